//! Paint and text styles carried by layers.

use crate::surface::FontSpec;

pub const DEFAULT_FONT_FAMILY: &str = "serif";
pub const DEFAULT_FONT_SIZE: f64 = 48.0;
pub const DEFAULT_FONT_WEIGHT: &str = "normal";
pub const DEFAULT_FONT_STYLE: &str = "normal";
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;
pub const DEFAULT_TEXT_COLOR: &str = "black";

/// A drop shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// An outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// Box paint: fill, outline and shadow. Every layer kind has one.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintStyle {
    /// Box fill colour. `None` leaves the box transparent.
    pub background: Option<String>,
    pub stroke_color: String,
    pub stroke_width: f64,
    /// Shadow colour. `None` disables the shadow entirely.
    pub shadow_color: Option<String>,
    pub shadow_blur: f64,
    pub shadow_offset_x: f64,
    pub shadow_offset_y: f64,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            background: None,
            stroke_color: "rgba(0,0,0,0)".into(),
            stroke_width: 0.0,
            shadow_color: None,
            shadow_blur: 0.0,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
        }
    }
}

impl PaintStyle {
    /// The outline, if it has any width.
    pub fn stroke(&self) -> Option<Stroke> {
        (self.stroke_width > 0.0).then(|| Stroke {
            color: self.stroke_color.clone(),
            width: self.stroke_width,
        })
    }

    /// The shadow, if a colour is set.
    pub fn shadow(&self) -> Option<Shadow> {
        self.shadow_color.as_ref().map(|color| Shadow {
            color: color.clone(),
            blur: self.shadow_blur,
            offset_x: self.shadow_offset_x,
            offset_y: self.shadow_offset_y,
        })
    }

    /// Whether drawing the box would produce any pixels.
    pub fn is_visible(&self) -> bool {
        self.background.is_some() || self.stroke_width > 0.0
    }
}

/// Text style. Unset fields inherit from the nearest text-capable ancestor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub letter_spacing: Option<f64>,
    /// Multiplier applied to the font size.
    pub line_height: Option<f64>,
    pub color: Option<String>,
}

/// A text style with every field filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveText {
    pub font: FontSpec,
    pub line_height: f64,
    pub color: String,
}

impl Default for EffectiveText {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            line_height: DEFAULT_LINE_HEIGHT,
            color: DEFAULT_TEXT_COLOR.into(),
        }
    }
}

impl EffectiveText {
    /// Distance between consecutive baselines, in pixels.
    pub fn line_advance(&self) -> f64 {
        self.font.size * self.line_height
    }
}

impl TextStyle {
    /// Fill unset fields from `inherited`, then from the defaults.
    pub fn effective(&self, inherited: Option<&EffectiveText>) -> EffectiveText {
        let base = inherited.cloned().unwrap_or_default();
        EffectiveText {
            font: FontSpec {
                family: self.font_family.clone().unwrap_or(base.font.family),
                size: self.font_size.unwrap_or(base.font.size),
                weight: self.font_weight.clone().unwrap_or(base.font.weight),
                style: self.font_style.clone().unwrap_or(base.font.style),
                letter_spacing: self.letter_spacing.unwrap_or(base.font.letter_spacing),
            },
            line_height: self.line_height.unwrap_or(base.line_height),
            color: self.color.clone().unwrap_or(base.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_defaults_are_invisible() {
        let paint = PaintStyle::default();
        assert!(!paint.is_visible());
        assert!(paint.stroke().is_none());
        assert!(paint.shadow().is_none());
    }

    #[test]
    fn stroke_needs_width() {
        let paint = PaintStyle {
            stroke_color: "black".into(),
            stroke_width: 2.0,
            ..PaintStyle::default()
        };
        assert_eq!(paint.stroke(), Some(Stroke { color: "black".into(), width: 2.0 }));
        assert!(paint.is_visible());
    }

    #[test]
    fn shadow_needs_color() {
        let paint = PaintStyle {
            shadow_color: Some("grey".into()),
            shadow_blur: 4.0,
            ..PaintStyle::default()
        };
        let shadow = paint.shadow().unwrap();
        assert_eq!(shadow.color, "grey");
        assert_eq!(shadow.blur, 4.0);
    }

    #[test]
    fn text_defaults() {
        let effective = TextStyle::default().effective(None);
        assert_eq!(effective.font.family, "serif");
        assert_eq!(effective.font.size, 48.0);
        assert_eq!(effective.line_height, 1.2);
        assert_eq!(effective.color, "black");
    }

    #[test]
    fn text_inherits_unset_fields() {
        let parent = TextStyle {
            font_family: Some("mono".into()),
            font_size: Some(20.0),
            color: Some("red".into()),
            ..TextStyle::default()
        }
        .effective(None);

        let child = TextStyle {
            font_size: Some(10.0),
            ..TextStyle::default()
        }
        .effective(Some(&parent));

        assert_eq!(child.font.family, "mono");
        assert_eq!(child.font.size, 10.0);
        assert_eq!(child.color, "red");
        assert_eq!(child.line_advance(), 12.0);
    }
}
