use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    /// Opacité du voile d'effacement appliqué à chaque frame
    /// (plus grand = traînées plus courtes)
    pub fade_alpha: f32,

    pub rocket_line_width: f32,
    pub rocket_head_radius: f32,
    pub rocket_saturation: f32,
    pub rocket_lightness: f32,

    pub particle_line_width: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fade_alpha: 0.15,
            rocket_line_width: 4.0,
            rocket_head_radius: 4.0,
            rocket_saturation: 1.0,
            rocket_lightness: 0.7,
            particle_line_width: 3.0,
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
