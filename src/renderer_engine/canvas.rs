use glam::Vec2;
use std::ops::Range;

use crate::physic_engine::Color;
use crate::renderer_engine::r#trait::DrawingSurface;
use crate::renderer_engine::types::{CompositeOperation, Rgba};

/// Surface de dessin logicielle : un tampon RGBA 8 bits (alpha non prémultiplié).
///
/// Reproduit le comportement d'un contexte canvas 2D pour ce dont le moteur a
/// besoin : composition `source-over` / `destination-out`, opacité globale,
/// segments anticrénelés à bouts ronds, disques pleins et rectangles.
#[derive(Debug, Clone)]
pub struct SoftwareCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    composite: CompositeOperation,
    global_alpha: f32,
}

impl SoftwareCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
            composite: CompositeOperation::SourceOver,
            global_alpha: 1.0,
        }
    }

    /// Pixel `(x, y)` en RGBA, `None` hors de la surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Vue brute du tampon (RGBA, ligne par ligne).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// `true` si tous les pixels sont totalement transparents.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 0)
    }

    /// Nombre de pixels non transparents.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] != 0).count()
    }

    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixels[self.index(x, y)])
        })
    }

    /// Aplatit la surface sur un fond opaque (export d'images).
    pub fn to_image_over(&self, background: Color) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let [r, g, b, a] = self.pixels[self.index(x, y)];
            let a = a as f32 / 255.0;
            let mix = |src: u8, bg: u8| (src as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
            image::Rgb([
                mix(r, background.r),
                mix(g, background.g),
                mix(b, background.b),
            ])
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixels dont le centre tombe dans `[lo, hi)` sur un axe de taille `max`.
    fn pixel_span(lo: f32, hi: f32, max: u32) -> Range<u32> {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let start = (lo - 0.5).ceil().clamp(0.0, max as f32) as u32;
        let end = (hi - 0.5).ceil().clamp(0.0, max as f32) as u32;
        start..end
    }

    /// Pixels touchés par une boîte englobante `[min, max]` (bornes incluses).
    fn bounding_span(min: f32, max: f32, size: u32) -> Range<u32> {
        let start = min.floor().clamp(0.0, size as f32) as u32;
        let end = (max.ceil() + 1.0).clamp(0.0, size as f32) as u32;
        start..end
    }

    /// Compose `style` sur le pixel `(x, y)` avec une couverture `coverage`.
    fn blend(&mut self, x: u32, y: u32, style: Rgba, coverage: f32) {
        let a = (style.alpha * self.global_alpha * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let idx = self.index(x, y);
        let px = &mut self.pixels[idx];

        match self.composite {
            CompositeOperation::SourceOver => {
                let da = px[3] as f32 / 255.0;
                let out_a = a + da * (1.0 - a);
                let src = [style.color.r, style.color.g, style.color.b];
                for (dst, src) in px.iter_mut().take(3).zip(src) {
                    let c = (src as f32 * a + *dst as f32 * da * (1.0 - a)) / out_a;
                    *dst = c.round().clamp(0.0, 255.0) as u8;
                }
                px[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
            }
            CompositeOperation::DestinationOut => {
                // arrondi par défaut : les traînées finissent par disparaître complètement
                let remaining = (px[3] as f32 * (1.0 - a)).floor();
                px[3] = remaining as u8;
                if px[3] == 0 {
                    *px = [0; 4];
                }
            }
        }
    }

    /// Distance du point `p` au segment `[a, b]`.
    fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
        let ab = b - a;
        let len2 = ab.length_squared();
        let t = if len2 > 0.0 {
            ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        p.distance(a + ab * t)
    }
}

impl DrawingSurface for SoftwareCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let xs = Self::pixel_span(x, x + width, self.width);
        for py in Self::pixel_span(y, y + height, self.height) {
            for px in xs.clone() {
                let idx = self.index(px, py);
                self.pixels[idx] = [0; 4];
            }
        }
    }

    fn set_composite_operation(&mut self, op: CompositeOperation) {
        self.composite = op;
    }

    fn composite_operation(&self) -> CompositeOperation {
        self.composite
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // comme sur un canvas : une valeur hors [0, 1] est ignorée
        if (0.0..=1.0).contains(&alpha) {
            self.global_alpha = alpha;
        }
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: Rgba) {
        let xs = Self::pixel_span(x, x + width, self.width);
        for py in Self::pixel_span(y, y + height, self.height) {
            for px in xs.clone() {
                self.blend(px, py, style, 1.0);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: Rgba, width: f32) {
        if !(width > 0.0) || !from.is_finite() || !to.is_finite() {
            return;
        }
        let half = width / 2.0;
        let min = from.min(to) - half;
        let max = from.max(to) + half;

        for py in Self::bounding_span(min.y, max.y, self.height) {
            for px in Self::bounding_span(min.x, max.x, self.width) {
                let center = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let d = Self::distance_to_segment(center, from, to);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, style, coverage);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, style: Rgba) {
        if !(radius > 0.0) || !center.is_finite() {
            return;
        }
        for py in Self::bounding_span(center.y - radius, center.y + radius, self.height) {
            for px in Self::bounding_span(center.x - radius, center.x + radius, self.width) {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, style, coverage);
                }
            }
        }
    }
}
