use serde::Deserialize;

use crate::physic_engine::types::Color;

/// Palette des particules d'explosion.
pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::rgb(0xff, 0x00, 0x43),
    Color::rgb(0x14, 0xfc, 0x56),
    Color::rgb(0x1e, 0x7f, 0xff),
    Color::rgb(0xe6, 0x0a, 0xff),
    Color::rgb(0xff, 0xbf, 0x36),
    Color::rgb(0xff, 0xff, 0xff),
    Color::rgb(0x00, 0xd2, 0xff),
    Color::rgb(0xff, 0x6b, 0x9d),
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicConfig {
    /// Nombre de particules par explosion
    pub particle_count: usize,

    pub rocket_speed: f32,
    pub rocket_acceleration: f32,

    pub particle_friction: f32,
    pub particle_gravity: f32,
    pub particle_min_speed: f32,
    pub particle_max_speed: f32,
    pub particle_min_decay: f32,
    pub particle_max_decay: f32,
    pub palette: Vec<Color>,

    /// Probabilité de lancer une fusée à chaque frame
    pub auto_launch_probability: f64,
    /// Écart horizontal max du point de lancement autour du centre
    pub launch_spread: f32,
    /// Zone cible, en fractions de la largeur/hauteur du viewport
    pub target_min_x: f32,
    pub target_max_x: f32,
    pub target_min_y: f32,
    pub target_max_y: f32,

    /// Salve d'ouverture : 1 lancement immédiat + (n - 1) lancements différés
    pub opening_volley_size: usize,
    pub opening_volley_interval_ms: u64,
}

impl Default for PhysicConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            rocket_speed: 10.0,
            rocket_acceleration: 1.02,
            particle_friction: 0.95,
            particle_gravity: 0.1,
            particle_min_speed: 2.0,
            particle_max_speed: 12.0,
            particle_min_decay: 0.01,
            particle_max_decay: 0.02,
            palette: DEFAULT_PALETTE.to_vec(),
            auto_launch_probability: 0.04,
            launch_spread: 300.0,
            target_min_x: 0.1,
            target_max_x: 0.9,
            target_min_y: 0.1,
            target_max_y: 0.5,
            opening_volley_size: 4,
            opening_volley_interval_ms: 400,
        }
    }
}

impl PhysicConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Vérifie les bornes qui rendraient la simulation incohérente.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.auto_launch_probability),
            "auto_launch_probability must be within [0, 1], got {}",
            self.auto_launch_probability
        );
        anyhow::ensure!(
            self.rocket_speed > 0.0 && self.rocket_acceleration >= 1.0,
            "rockets must move forward (speed > 0, acceleration >= 1)"
        );
        anyhow::ensure!(
            self.particle_min_decay > 0.0 && self.particle_min_decay <= self.particle_max_decay,
            "particle decay range must be positive and ordered"
        );
        anyhow::ensure!(!self.palette.is_empty(), "palette must not be empty");
        Ok(())
    }
}
