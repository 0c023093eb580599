// build.rs
use cargo_metadata::MetadataCommand;
use std::collections::HashSet;
use std::env;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    if env::var("CARGO_FEATURE_PLAYBACK").is_ok() {
        println!("cargo:warning=🔊 Compilation avec lecture audio (feature = \"playback\")");
    }

    // Récupère la metadata du projet ; sans elle on compile quand même.
    let metadata = match MetadataCommand::new().exec() {
        Ok(metadata) => metadata,
        Err(e) => {
            println!("cargo:warning=cargo metadata failed: {}", e);
            return;
        }
    };

    // Ensemble des crates qui nous intéressent
    let tracked = HashSet::from(["cpal", "image", "rand"]);

    for package in &metadata.packages {
        if tracked.contains(package.name.as_str()) {
            println!(
                "cargo:rustc-env={}={}",
                package.name.to_uppercase(),
                package.version
            );
        }
    }
}
