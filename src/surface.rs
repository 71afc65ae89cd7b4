//! The drawing contract.
//!
//! The scene never rasterizes anything itself. Each frame it hands resolved
//! geometry and style to a [`DrawingSurface`] supplied by the host, in paint
//! order, bracketed by `save`/`restore`.

use crate::geometry::{Affine, Rect, Size};
use crate::layer::{Shadow, Stroke};
use crate::layer::style::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_FONT_STYLE, DEFAULT_FONT_WEIGHT};

/// A resolved font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Pixels.
    pub size: f64,
    pub weight: String,
    pub style: String,
    /// Extra pixels between glyphs.
    pub letter_spacing: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.into(),
            size: DEFAULT_FONT_SIZE,
            weight: DEFAULT_FONT_WEIGHT.into(),
            style: DEFAULT_FONT_STYLE.into(),
            letter_spacing: 0.0,
        }
    }
}

impl FontSpec {
    /// CSS font shorthand, e.g. `"normal bold 48px serif"`.
    pub fn shorthand(&self) -> String {
        format!("{} {} {}px {}", self.style, self.weight, self.size, self.family)
    }
}

/// A box to fill and outline, in the layer's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPaint<'a> {
    pub rect: Rect,
    /// Corner radii: top-left, top-right, bottom-right, bottom-left.
    pub radii: [f64; 4],
    pub background: Option<&'a str>,
    pub stroke: Option<Stroke>,
    pub shadow: Option<Shadow>,
}

/// One line of text, positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub font: &'a FontSpec,
    pub color: &'a str,
    pub stroke: Option<Stroke>,
    pub shadow: Option<Shadow>,
}

/// Text measurement, needed by layout as well as painting.
pub trait TextMeasure {
    /// Advance width of `text` in pixels, including letter spacing.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64;
}

/// A 2D drawing backend.
///
/// Transforms set with [`set_transform`](Self::set_transform) replace the
/// current matrix. The scene always passes complete matrices from a layer's
/// local space to backing-store pixels, so the backing scale chosen in
/// [`resize_backing`](Self::resize_backing) is already folded in.
pub trait DrawingSurface: TextMeasure {
    /// Size the backing store. `logical` is in CSS pixels; the store holds
    /// `logical * pixel_ratio` device pixels when the ratio exceeds one.
    fn resize_backing(&mut self, logical: Size, pixel_ratio: f64);

    /// Clear the whole surface.
    fn clear(&mut self, size: Size);

    fn save(&mut self);

    fn restore(&mut self);

    fn set_transform(&mut self, matrix: &Affine);

    /// Fill the canvas background.
    fn fill_background(&mut self, color: &str, rect: Rect);

    fn draw_box(&mut self, paint: &BoxPaint<'_>);

    fn draw_text(&mut self, paint: &TextPaint<'_>);

    /// Draw a loaded image stretched over `rect`.
    fn draw_image(&mut self, src: &str, rect: Rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_shorthand() {
        let font = FontSpec { weight: "bold".into(), size: 12.0, ..FontSpec::default() };
        assert_eq!(font.shorthand(), "normal bold 12px serif");
    }
}
