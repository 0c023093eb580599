pub mod r#trait;
pub use r#trait::DrawingSurface;

pub mod types;
pub use self::types::{CompositeOperation, Rgba};

pub mod config;
pub use self::config::RendererConfig;

pub mod canvas;
pub use self::canvas::SoftwareCanvas;

pub mod drawable;
pub use self::drawable::Drawable;

pub mod renderer;
pub use self::renderer::Renderer;

pub mod exporter;
pub use self::exporter::FrameExporter;

#[cfg(any(test, feature = "test_helpers"))]
pub mod recording;
#[cfg(any(test, feature = "test_helpers"))]
pub use self::recording::{DrawCommand, RecordingSurface};
