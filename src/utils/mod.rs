pub mod tools;

pub use self::tools::{dependency_version, show_rust_core_dependencies};
