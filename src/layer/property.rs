//! Typed property updates.
//!
//! Every mutable layer property is a [`Property`] variant carrying its value.
//! Which keys a layer accepts is fixed per [`LayerKind`]: keys outside a
//! kind's list are rejected with [`SceneError::UnknownProperty`].

use std::fmt;

use super::node::{Layer, LayerKind};
use crate::scene::SceneError;
use crate::unit::{Axis, Dependency, ResolvedValue, Sides, SidesInput, ValueError, ValueInput};

/// A property assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    X(ValueInput),
    Y(ValueInput),
    Width(ValueInput),
    Height(ValueInput),
    /// Degrees.
    Rotation(f64),
    ScaleX(f64),
    ScaleY(f64),
    /// Degrees.
    SkewX(f64),
    /// Degrees.
    SkewY(f64),
    Margin(SidesInput),
    Padding(SidesInput),
    Radius(SidesInput),
    Background(Option<String>),
    StrokeColor(String),
    StrokeWidth(f64),
    ShadowColor(Option<String>),
    ShadowBlur(f64),
    ShadowOffsetX(f64),
    ShadowOffsetY(f64),
    ClassName(String),
    Content(String),
    FontFamily(String),
    FontSize(f64),
    FontWeight(String),
    FontStyle(String),
    LetterSpacing(f64),
    LineHeight(f64),
    Color(String),
    Src(String),
}

/// The key of a [`Property`], without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    X,
    Y,
    Width,
    Height,
    Rotation,
    ScaleX,
    ScaleY,
    SkewX,
    SkewY,
    Margin,
    Padding,
    Radius,
    Background,
    StrokeColor,
    StrokeWidth,
    ShadowColor,
    ShadowBlur,
    ShadowOffsetX,
    ShadowOffsetY,
    ClassName,
    Content,
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    LetterSpacing,
    LineHeight,
    Color,
    Src,
}

const BOX_KEYS: &[PropertyKey] = &[
    PropertyKey::X,
    PropertyKey::Y,
    PropertyKey::Width,
    PropertyKey::Height,
    PropertyKey::Rotation,
    PropertyKey::ScaleX,
    PropertyKey::ScaleY,
    PropertyKey::SkewX,
    PropertyKey::SkewY,
    PropertyKey::Margin,
    PropertyKey::Padding,
    PropertyKey::Radius,
    PropertyKey::Background,
    PropertyKey::StrokeColor,
    PropertyKey::StrokeWidth,
    PropertyKey::ShadowColor,
    PropertyKey::ShadowBlur,
    PropertyKey::ShadowOffsetX,
    PropertyKey::ShadowOffsetY,
    PropertyKey::ClassName,
];

const TEXT_KEYS: &[PropertyKey] = &[
    PropertyKey::Content,
    PropertyKey::FontFamily,
    PropertyKey::FontSize,
    PropertyKey::FontWeight,
    PropertyKey::FontStyle,
    PropertyKey::LetterSpacing,
    PropertyKey::LineHeight,
    PropertyKey::Color,
];

const IMAGE_KEYS: &[PropertyKey] = &[PropertyKey::Src];

impl PropertyKey {
    /// The authoring name, e.g. `"scaleX"`.
    pub fn name(self) -> &'static str {
        match self {
            PropertyKey::X => "x",
            PropertyKey::Y => "y",
            PropertyKey::Width => "width",
            PropertyKey::Height => "height",
            PropertyKey::Rotation => "rotation",
            PropertyKey::ScaleX => "scaleX",
            PropertyKey::ScaleY => "scaleY",
            PropertyKey::SkewX => "skewX",
            PropertyKey::SkewY => "skewY",
            PropertyKey::Margin => "margin",
            PropertyKey::Padding => "padding",
            PropertyKey::Radius => "radius",
            PropertyKey::Background => "backgroundColor",
            PropertyKey::StrokeColor => "strokeColor",
            PropertyKey::StrokeWidth => "strokeWidth",
            PropertyKey::ShadowColor => "shadowColor",
            PropertyKey::ShadowBlur => "shadowBlur",
            PropertyKey::ShadowOffsetX => "shadowOffsetX",
            PropertyKey::ShadowOffsetY => "shadowOffsetY",
            PropertyKey::ClassName => "className",
            PropertyKey::Content => "content",
            PropertyKey::FontFamily => "fontFamily",
            PropertyKey::FontSize => "fontSize",
            PropertyKey::FontWeight => "fontWeight",
            PropertyKey::FontStyle => "fontStyle",
            PropertyKey::LetterSpacing => "letterSpacing",
            PropertyKey::LineHeight => "lineHeight",
            PropertyKey::Color => "color",
            PropertyKey::Src => "src",
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Property {
    pub fn key(&self) -> PropertyKey {
        match self {
            Property::X(_) => PropertyKey::X,
            Property::Y(_) => PropertyKey::Y,
            Property::Width(_) => PropertyKey::Width,
            Property::Height(_) => PropertyKey::Height,
            Property::Rotation(_) => PropertyKey::Rotation,
            Property::ScaleX(_) => PropertyKey::ScaleX,
            Property::ScaleY(_) => PropertyKey::ScaleY,
            Property::SkewX(_) => PropertyKey::SkewX,
            Property::SkewY(_) => PropertyKey::SkewY,
            Property::Margin(_) => PropertyKey::Margin,
            Property::Padding(_) => PropertyKey::Padding,
            Property::Radius(_) => PropertyKey::Radius,
            Property::Background(_) => PropertyKey::Background,
            Property::StrokeColor(_) => PropertyKey::StrokeColor,
            Property::StrokeWidth(_) => PropertyKey::StrokeWidth,
            Property::ShadowColor(_) => PropertyKey::ShadowColor,
            Property::ShadowBlur(_) => PropertyKey::ShadowBlur,
            Property::ShadowOffsetX(_) => PropertyKey::ShadowOffsetX,
            Property::ShadowOffsetY(_) => PropertyKey::ShadowOffsetY,
            Property::ClassName(_) => PropertyKey::ClassName,
            Property::Content(_) => PropertyKey::Content,
            Property::FontFamily(_) => PropertyKey::FontFamily,
            Property::FontSize(_) => PropertyKey::FontSize,
            Property::FontWeight(_) => PropertyKey::FontWeight,
            Property::FontStyle(_) => PropertyKey::FontStyle,
            Property::LetterSpacing(_) => PropertyKey::LetterSpacing,
            Property::LineHeight(_) => PropertyKey::LineHeight,
            Property::Color(_) => PropertyKey::Color,
            Property::Src(_) => PropertyKey::Src,
        }
    }
}

impl LayerKind {
    /// Whether layers of this kind accept `key`.
    pub fn accepts(&self, key: PropertyKey) -> bool {
        BOX_KEYS.contains(&key)
            || match self {
                LayerKind::Rect => false,
                LayerKind::Text(_) => TEXT_KEYS.contains(&key),
                LayerKind::Image(_) => IMAGE_KEYS.contains(&key),
            }
    }

    /// Every key this kind accepts.
    pub fn settable(&self) -> impl Iterator<Item = PropertyKey> {
        let extra = match self {
            LayerKind::Rect => &[][..],
            LayerKind::Text(_) => TEXT_KEYS,
            LayerKind::Image(_) => IMAGE_KEYS,
        };
        BOX_KEYS.iter().chain(extra).copied()
    }
}

fn finite(key: PropertyKey, value: f64) -> Result<f64, ValueError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValueError::InvalidValue {
            input: value.to_string(),
            message: format!("{key} must be a finite number"),
        })
    }
}

/// Assign `value` to `slot`, reporting whether it changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl Layer {
    /// Apply a property assignment.
    ///
    /// Returns whether the change is visible. Resolved-value properties
    /// (geometry, margin, padding, radius) always count as changed. Nothing is
    /// modified when an error is returned.
    pub fn apply(&mut self, property: Property) -> Result<bool, SceneError> {
        let key = property.key();
        if !self.kind.accepts(key) {
            return Err(SceneError::UnknownProperty { property: key, kind: self.kind.name() });
        }

        let changed = match property {
            Property::X(v) => {
                self.x = ResolvedValue::parse(v, Axis::Width)?;
                true
            }
            Property::Y(v) => {
                self.y = ResolvedValue::parse(v, Axis::Height)?;
                true
            }
            Property::Width(v) => {
                self.width = ResolvedValue::parse(v, Axis::Width)?;
                true
            }
            Property::Height(v) => {
                self.height = ResolvedValue::parse(v, Axis::Height)?;
                true
            }
            Property::Margin(v) => {
                self.margin = Sides::parse(v, Dependency::None)?;
                true
            }
            Property::Padding(v) => {
                self.padding = Sides::parse(v, Dependency::None)?;
                true
            }
            Property::Radius(v) => {
                self.radius = Sides::parse(v, Dependency::SelfSize)?;
                true
            }
            Property::Rotation(v) => replace(&mut self.transform.rotation, finite(key, v)?),
            Property::ScaleX(v) => replace(&mut self.transform.scale_x, finite(key, v)?),
            Property::ScaleY(v) => replace(&mut self.transform.scale_y, finite(key, v)?),
            Property::SkewX(v) => replace(&mut self.transform.skew_x, finite(key, v)?),
            Property::SkewY(v) => replace(&mut self.transform.skew_y, finite(key, v)?),
            Property::Background(v) => replace(&mut self.paint.background, v),
            Property::StrokeColor(v) => replace(&mut self.paint.stroke_color, v),
            Property::StrokeWidth(v) => replace(&mut self.paint.stroke_width, finite(key, v)?),
            Property::ShadowColor(v) => replace(&mut self.paint.shadow_color, v),
            Property::ShadowBlur(v) => replace(&mut self.paint.shadow_blur, finite(key, v)?),
            Property::ShadowOffsetX(v) => replace(&mut self.paint.shadow_offset_x, finite(key, v)?),
            Property::ShadowOffsetY(v) => replace(&mut self.paint.shadow_offset_y, finite(key, v)?),
            // Not painted.
            Property::ClassName(v) => {
                self.class_name = v;
                false
            }
            Property::Src(v) => match &mut self.kind {
                LayerKind::Image(image) => image.set_src(v),
                _ => false,
            },
            text => match &mut self.kind {
                LayerKind::Text(content) => content.apply(text, key)?,
                _ => false,
            },
        };
        Ok(changed)
    }
}

impl super::node::TextContent {
    fn apply(&mut self, property: Property, key: PropertyKey) -> Result<bool, ValueError> {
        let style = &mut self.style;
        let changed = match property {
            Property::Content(v) => replace(&mut self.content, v),
            Property::FontFamily(v) => replace(&mut style.font_family, Some(v)),
            Property::FontSize(v) => replace(&mut style.font_size, Some(finite(key, v)?)),
            Property::FontWeight(v) => replace(&mut style.font_weight, Some(v)),
            Property::FontStyle(v) => replace(&mut style.font_style, Some(v)),
            Property::LetterSpacing(v) => replace(&mut style.letter_spacing, Some(finite(key, v)?)),
            Property::LineHeight(v) => replace(&mut style.line_height, Some(finite(key, v)?)),
            Property::Color(v) => replace(&mut style.color, Some(v)),
            _ => false,
        };
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerOptions;

    fn rect() -> Layer {
        Layer::new(LayerOptions::rect()).unwrap()
    }

    #[test]
    fn rect_rejects_text_keys() {
        let mut layer = rect();
        let err = layer.apply(Property::FontSize(12.0)).unwrap_err();
        assert_eq!(
            err,
            SceneError::UnknownProperty { property: PropertyKey::FontSize, kind: "Rect" }
        );
        assert!(layer.apply(Property::Src("a.png".into())).is_err());
    }

    #[test]
    fn text_accepts_text_keys_but_not_src() {
        let mut layer = Layer::new(LayerOptions::text("hi")).unwrap();
        assert!(layer.apply(Property::FontSize(12.0)).unwrap());
        assert!(layer.apply(Property::Src("a.png".into())).is_err());
    }

    #[test]
    fn image_accepts_src() {
        let mut layer = Layer::new(LayerOptions::image("a.png")).unwrap();
        assert!(!layer.apply(Property::Src("a.png".into())).unwrap());
        assert!(layer.apply(Property::Src("b.png".into())).unwrap());
    }

    #[test]
    fn settable_lists_match_accepts() {
        for options in [LayerOptions::rect(), LayerOptions::text(""), LayerOptions::image("x")] {
            let layer = Layer::new(options).unwrap();
            for key in layer.kind().settable() {
                assert!(layer.kind().accepts(key), "{key}");
            }
        }
    }

    #[test]
    fn resolved_values_always_change() {
        let mut layer = rect();
        assert!(layer.apply(Property::X(0.0.into())).unwrap());
        assert!(layer.apply(Property::X(0.0.into())).unwrap());
    }

    #[test]
    fn plain_values_change_only_when_different() {
        let mut layer = rect();
        assert!(!layer.apply(Property::Rotation(0.0)).unwrap());
        assert!(layer.apply(Property::Rotation(45.0)).unwrap());
        assert!(!layer.apply(Property::Rotation(45.0)).unwrap());
    }

    #[test]
    fn invalid_value_leaves_layer_untouched() {
        let mut layer = rect();
        let before = layer.clone();
        assert!(matches!(
            layer.apply(Property::Width("wide".into())),
            Err(SceneError::InvalidValue(_))
        ));
        assert!(layer.apply(Property::Rotation(f64::NAN)).is_err());
        assert_eq!(layer, before);
    }

    #[test]
    fn class_name_is_not_visible() {
        let mut layer = rect();
        assert!(!layer.apply(Property::ClassName("card".into())).unwrap());
        assert_eq!(layer.class_name(), "card");
    }

    #[test]
    fn radius_percent_depends_on_self() {
        let mut layer = rect();
        layer.apply(Property::Radius("50%".into())).unwrap();
        assert_eq!(layer.radius().top.dependency(), Dependency::SelfSize);
    }

    #[test]
    fn key_names() {
        assert_eq!(PropertyKey::ScaleX.to_string(), "scaleX");
        assert_eq!(Property::Background(None).key().name(), "backgroundColor");
    }
}
