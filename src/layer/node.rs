//! Layer types: LayerId, Layer, LayerKind, LayerOptions.

use slotmap::new_key_type;

use super::image::ImageSource;
use super::style::{EffectiveText, PaintStyle, TextStyle};
use super::text::TextLine;
use crate::geometry::{Affine, Quad, Size};
use crate::unit::{Axis, Dependency, ResolvedValue, Sides, SidesInput, ValueError, ValueInput};

new_key_type! {
    /// Unique identifier for a layer. Copy, lightweight (u64).
    pub struct LayerId;
}

/// Plain transform parameters. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self { rotation: 0.0, scale_x: 1.0, scale_y: 1.0, skew_x: 0.0, skew_y: 0.0 }
    }
}

/// Text content plus the products of the last layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub(crate) content: String,
    pub(crate) style: TextStyle,
    pub(crate) lines: Vec<TextLine>,
    pub(crate) effective: Option<EffectiveText>,
}

impl TextContent {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Lines from the last layout pass.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// The fully inherited style used by the last layout pass.
    pub fn effective(&self) -> Option<&EffectiveText> {
        self.effective.as_ref()
    }
}

/// What a layer draws inside its box.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Only the box.
    Rect,
    Text(TextContent),
    Image(ImageSource),
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Rect => "Rect",
            LayerKind::Text(_) => "Text",
            LayerKind::Image(_) => "Image",
        }
    }
}

/// A positioned, styled box in the scene.
///
/// Tree links (parent, children, owning canvas) live in the
/// [`Scene`](crate::scene::Scene), not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub(crate) kind: LayerKind,
    pub(crate) class_name: String,
    pub(crate) x: ResolvedValue,
    pub(crate) y: ResolvedValue,
    pub(crate) width: ResolvedValue,
    pub(crate) height: ResolvedValue,
    pub(crate) transform: LocalTransform,
    pub(crate) margin: Sides,
    pub(crate) padding: Sides,
    pub(crate) radius: Sides,
    pub(crate) paint: PaintStyle,
    /// World matrix at the layer's centre, from the last pass.
    pub(crate) matrix: Affine,
    /// Corner points from the last pass.
    pub(crate) quad: Option<Quad>,
}

impl Layer {
    /// Build a layer from construction options.
    ///
    /// Unset options take their defaults. Options that do not apply to the
    /// layer's kind are ignored. Invalid size tokens fail.
    pub fn new(options: LayerOptions) -> Result<Self, ValueError> {
        let LayerOptions {
            kind,
            class_name,
            x,
            y,
            width,
            height,
            transform,
            margin,
            padding,
            radius,
            paint,
            content,
            text_style,
            src,
        } = options;

        let kind = match kind {
            KindOption::Rect => LayerKind::Rect,
            KindOption::Text => LayerKind::Text(TextContent {
                content: content.unwrap_or_default(),
                style: text_style,
                lines: Vec::new(),
                effective: None,
            }),
            KindOption::Image => LayerKind::Image(ImageSource::new(src)),
        };

        let sides = |input: Option<SidesInput>, preferred| match input {
            Some(input) => Sides::parse(input, preferred),
            None => Ok(Sides::zero()),
        };

        Ok(Self {
            kind,
            class_name: class_name.unwrap_or_default(),
            x: ResolvedValue::parse(x.unwrap_or(ValueInput::Number(0.0)), Axis::Width)?,
            y: ResolvedValue::parse(y.unwrap_or(ValueInput::Number(0.0)), Axis::Height)?,
            width: ResolvedValue::parse(width.unwrap_or(ValueInput::Number(0.0)), Axis::Width)?,
            height: ResolvedValue::parse(height.unwrap_or(ValueInput::Number(0.0)), Axis::Height)?,
            transform,
            margin: sides(margin, Dependency::None)?,
            padding: sides(padding, Dependency::None)?,
            radius: sides(radius, Dependency::SelfSize)?,
            paint,
            matrix: Affine::IDENTITY,
            quad: None,
        })
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn x(&self) -> &ResolvedValue {
        &self.x
    }

    pub fn y(&self) -> &ResolvedValue {
        &self.y
    }

    pub fn width(&self) -> &ResolvedValue {
        &self.width
    }

    pub fn height(&self) -> &ResolvedValue {
        &self.height
    }

    /// Resolved size in pixels. Unseeded dimensions read as zero.
    pub fn size(&self) -> Size {
        Size::new(self.width.pixels(), self.height.pixels())
    }

    pub fn transform(&self) -> &LocalTransform {
        &self.transform
    }

    pub fn margin(&self) -> &Sides {
        &self.margin
    }

    pub fn padding(&self) -> &Sides {
        &self.padding
    }

    pub fn radius(&self) -> &Sides {
        &self.radius
    }

    pub fn paint(&self) -> &PaintStyle {
        &self.paint
    }

    pub fn text(&self) -> Option<&TextContent> {
        match &self.kind {
            LayerKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageSource> {
        match &self.kind {
            LayerKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Drop cached geometry. The next pass recomputes it.
    pub(crate) fn reset_geometry(&mut self) {
        self.matrix = Affine::IDENTITY;
        self.quad = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KindOption {
    Rect,
    Text,
    Image,
}

/// Construction options for a layer.
///
/// ```
/// use gilt_canvas::layer::LayerOptions;
///
/// let options = LayerOptions::rect()
///     .with_position(10, 10)
///     .with_size("50%", 100)
///     .with_background("tomato");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOptions {
    kind: KindOption,
    class_name: Option<String>,
    x: Option<ValueInput>,
    y: Option<ValueInput>,
    width: Option<ValueInput>,
    height: Option<ValueInput>,
    transform: LocalTransform,
    margin: Option<SidesInput>,
    padding: Option<SidesInput>,
    radius: Option<SidesInput>,
    paint: PaintStyle,
    content: Option<String>,
    text_style: TextStyle,
    src: Option<String>,
}

impl LayerOptions {
    fn of(kind: KindOption) -> Self {
        Self {
            kind,
            class_name: None,
            x: None,
            y: None,
            width: None,
            height: None,
            transform: LocalTransform::default(),
            margin: None,
            padding: None,
            radius: None,
            paint: PaintStyle::default(),
            content: None,
            text_style: TextStyle::default(),
            src: None,
        }
    }

    /// A plain box.
    pub fn rect() -> Self {
        Self::of(KindOption::Rect)
    }

    /// A text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Self::of(KindOption::Text) }
    }

    /// An image. Nothing is drawn until the host reports the load.
    pub fn image(src: impl Into<String>) -> Self {
        Self { src: Some(src.into()), ..Self::of(KindOption::Image) }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_x(mut self, x: impl Into<ValueInput>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn with_y(mut self, y: impl Into<ValueInput>) -> Self {
        self.y = Some(y.into());
        self
    }

    /// Set both `x` and `y`.
    pub fn with_position(self, x: impl Into<ValueInput>, y: impl Into<ValueInput>) -> Self {
        self.with_x(x).with_y(y)
    }

    pub fn with_width(mut self, width: impl Into<ValueInput>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<ValueInput>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Set both `width` and `height`.
    pub fn with_size(self, width: impl Into<ValueInput>, height: impl Into<ValueInput>) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.transform.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.transform.scale_x = scale_x;
        self.transform.scale_y = scale_y;
        self
    }

    pub fn with_skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.transform.skew_x = skew_x;
        self.transform.skew_y = skew_y;
        self
    }

    pub fn with_margin(mut self, margin: impl Into<SidesInput>) -> Self {
        self.margin = Some(margin.into());
        self
    }

    pub fn with_padding(mut self, padding: impl Into<SidesInput>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    /// Corner radii. Percentages are of the layer's smaller side.
    pub fn with_radius(mut self, radius: impl Into<SidesInput>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.paint.background = Some(color.into());
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.paint.stroke_color = color.into();
        self.paint.stroke_width = width;
        self
    }

    pub fn with_shadow(mut self, color: impl Into<String>, blur: f64, offset_x: f64, offset_y: f64) -> Self {
        self.paint.shadow_color = Some(color.into());
        self.paint.shadow_blur = blur;
        self.paint.shadow_offset_x = offset_x;
        self.paint.shadow_offset_y = offset_y;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.text_style.font_family = Some(family.into());
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.text_style.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.text_style.font_weight = Some(weight.into());
        self
    }

    pub fn with_font_style(mut self, style: impl Into<String>) -> Self {
        self.text_style.font_style = Some(style.into());
        self
    }

    pub fn with_letter_spacing(mut self, spacing: f64) -> Self {
        self.text_style.letter_spacing = Some(spacing);
        self
    }

    pub fn with_line_height(mut self, factor: f64) -> Self {
        self.text_style.line_height = Some(factor);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.text_style.color = Some(color.into());
        self
    }
}
