use log::info;

// Versions injectées par build.rs (cargo_metadata).
const TRACKED_CRATES: [(&str, Option<&str>); 3] = [
    ("cpal", option_env!("CPAL")),
    ("image", option_env!("IMAGE")),
    ("rand", option_env!("RAND")),
];

/// Version d'une dépendance suivie, telle que connue à la compilation.
pub fn dependency_version(name: &str) -> Option<&'static str> {
    TRACKED_CRATES
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, v)| *v)
        .filter(|v| !v.is_empty())
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependancies");
    for (name, _) in TRACKED_CRATES {
        info!(
            "  {:<5} version: {}",
            name,
            dependency_version(name).unwrap_or("Unknown")
        );
    }
}
