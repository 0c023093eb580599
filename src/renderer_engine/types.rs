use crate::physic_engine::Color;

/// Couleur de remplissage/tracé avec opacité propre (`alpha` dans [0, 1]).
///
/// L'opacité effective d'un tracé est `alpha × global_alpha` de la surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Color,
    pub alpha: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(Color::BLACK, 0.0);
    pub const WHITE: Rgba = Rgba::new(Color::WHITE, 1.0);

    pub const fn new(color: Color, alpha: f32) -> Self {
        Self { color, alpha }
    }

    pub const fn opaque(color: Color) -> Self {
        Self::new(color, 1.0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        Self::opaque(color)
    }
}

/// Mode de composition des dessins, à la manière de `globalCompositeOperation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOperation {
    /// Dessin normal par-dessus le contenu existant.
    #[default]
    SourceOver,
    /// Efface le contenu existant proportionnellement à l'opacité de la source.
    DestinationOut,
}
