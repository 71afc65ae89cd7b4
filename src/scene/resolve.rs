//! The resolution pass: turning relative values into pixels.
//!
//! Per layer, values are seeded in a fixed order:
//!
//! 1. viewport units, against the canvas size
//! 2. parent-relative values, against the container (parent layer or canvas)
//! 3. self-relative values (percent radii), against the layer's own size
//! 4. auto values, from intrinsic content measurement
//!
//! Each step reads the results of the previous ones. When step 4 fills in an
//! auto dimension, step 3 runs again so radii see the final size.

use super::canvas::Canvas;
use crate::geometry::Size;
use crate::layer::text::{natural_width, wrap};
use crate::layer::{EffectiveText, Layer, LayerKind};
use crate::surface::TextMeasure;
use crate::unit::{Axis, Dependency, ResolvedValue, Unit};

/// What a layer resolves against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolveContext<'a> {
    /// Canvas size, the reference for `vw`/`vh` on layers.
    pub viewport: Size,
    /// Parent size, or the canvas size for top-level layers.
    pub container: Size,
    /// Effective style of the nearest text ancestor.
    pub inherited: Option<&'a EffectiveText>,
}

fn along(axis: Axis, size: Size) -> f64 {
    match axis {
        Axis::Width => size.width,
        Axis::Height => size.height,
    }
}

fn viewport_reference(value: &ResolvedValue, viewport: Size) -> f64 {
    match value.unit() {
        Unit::ViewportWidth => viewport.width,
        _ => viewport.height,
    }
}

fn values_mut(layer: &mut Layer) -> impl Iterator<Item = &mut ResolvedValue> + '_ {
    [&mut layer.x, &mut layer.y, &mut layer.width, &mut layer.height]
        .into_iter()
        .chain(layer.margin.iter_mut())
        .chain(layer.padding.iter_mut())
        .chain(layer.radius.iter_mut())
}

/// Seed every value of `layer` for this pass.
pub(crate) fn resolve_layer<M: TextMeasure + ?Sized>(
    layer: &mut Layer,
    ctx: &ResolveContext<'_>,
    measure: &mut M,
) {
    for value in values_mut(layer) {
        if value.dependency() == Dependency::Viewport {
            let reference = viewport_reference(value, ctx.viewport);
            value.seed(reference);
        }
    }

    for value in values_mut(layer) {
        if value.dependency() == Dependency::Parent {
            value.seed(along(value.axis(), ctx.container));
        }
    }

    seed_self(layer);

    if seed_auto(layer, ctx, measure) {
        seed_self(layer);
    }
}

fn seed_self(layer: &mut Layer) {
    let reference = layer.size().min_side();
    for value in layer.radius.iter_mut() {
        if value.dependency() == Dependency::SelfSize {
            value.seed(reference);
        }
    }
}

/// Fill auto values from content. Returns whether a dimension was auto.
fn seed_auto<M: TextMeasure + ?Sized>(
    layer: &mut Layer,
    ctx: &ResolveContext<'_>,
    measure: &mut M,
) -> bool {
    // Offsets and box sides have no content to measure.
    for value in [&mut layer.x, &mut layer.y]
        .into_iter()
        .chain(layer.margin.iter_mut())
        .chain(layer.padding.iter_mut())
        .chain(layer.radius.iter_mut())
    {
        if value.is_auto() {
            value.seed(0.0);
        }
    }

    let horizontal = layer.padding.horizontal();
    let vertical = layer.padding.vertical();
    let auto_width = layer.width.is_auto();
    let auto_height = layer.height.is_auto();

    match &mut layer.kind {
        LayerKind::Rect => {
            if auto_width {
                layer.width.seed(0.0);
            }
            if auto_height {
                layer.height.seed(0.0);
            }
        }
        LayerKind::Text(text) => {
            let effective = text.style.effective(ctx.inherited);
            if auto_width {
                layer.width.seed(natural_width(&text.content, &effective.font, measure) + horizontal);
            }
            let available = (layer.width.pixels() - horizontal).max(0.0);
            text.lines = wrap(&text.content, available, &effective.font, measure);
            if auto_height {
                layer.height.seed(text.lines.len() as f64 * effective.line_advance() + vertical);
            }
            text.effective = Some(effective);
        }
        LayerKind::Image(image) => {
            if auto_width {
                let natural = image.natural_size().map_or(0.0, |size| size.width);
                layer.width.seed(natural + horizontal);
            }
            if auto_height {
                let ratio = image.aspect_ratio().unwrap_or(0.0);
                layer.height.seed(layer.width.pixels() * ratio + vertical);
            }
        }
    }

    auto_width || auto_height
}

impl Canvas {
    /// Seed the canvas size from the host. Returns whether it changed.
    ///
    /// Percent and `auto` sizes read the container, `vw`/`vh` the viewport.
    /// Values are only reseeded when their reference changed or they have
    /// never been seeded.
    pub(crate) fn seed_size(&mut self, viewport: Size, container: Size) -> bool {
        let viewport_changed = self.viewport != Some(viewport);
        let container_changed = self.container != Some(container);
        let mut changed = false;

        for value in [&mut self.width, &mut self.height] {
            let stale = !value.is_resolved();
            let reference = match value.dependency() {
                Dependency::Viewport if viewport_changed || stale => {
                    Some(viewport_reference(value, viewport))
                }
                Dependency::Parent | Dependency::Auto if container_changed || stale => {
                    Some(along(value.axis(), container))
                }
                _ => None,
            };
            if let Some(reference) = reference {
                let before = value.resolved();
                value.seed(reference);
                changed |= value.resolved() != before;
            }
        }

        self.viewport = Some(viewport);
        self.container = Some(container);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{LayerOptions, Property};
    use crate::scene::CanvasConfig;
    use crate::testing::RecordingSurface;

    const CANVAS: Size = Size::new(400.0, 300.0);

    fn resolve(options: LayerOptions, container: Size) -> Layer {
        let mut layer = Layer::new(options).unwrap();
        let ctx = ResolveContext { viewport: CANVAS, container, inherited: None };
        resolve_layer(&mut layer, &ctx, &mut RecordingSurface::new());
        layer
    }

    #[test]
    fn percent_reads_container_axis() {
        let layer = resolve(
            LayerOptions::rect().with_position("10%", "10%").with_size("50%", "50%"),
            Size::new(200.0, 100.0),
        );
        assert_eq!(layer.x().pixels(), 20.0);
        assert_eq!(layer.y().pixels(), 10.0);
        assert_eq!(layer.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn viewport_units_read_canvas() {
        let layer = resolve(
            LayerOptions::rect().with_size("10vh", "50vw"),
            Size::new(10.0, 10.0),
        );
        assert_eq!(layer.size(), Size::new(30.0, 200.0));
    }

    #[test]
    fn sides_resolve_by_axis() {
        let layer = resolve(
            LayerOptions::rect().with_margin("10%").with_padding(["5%", "1vw"]),
            Size::new(200.0, 100.0),
        );
        assert_eq!(layer.margin().pixels(), [10.0, 20.0, 10.0, 20.0]);
        assert_eq!(layer.padding().pixels(), [5.0, 4.0, 5.0, 4.0]);
    }

    #[test]
    fn percent_radius_reads_smaller_side() {
        let layer = resolve(
            LayerOptions::rect().with_size(200, "50%").with_radius("50%"),
            CANVAS,
        );
        assert_eq!(layer.size(), Size::new(200.0, 150.0));
        assert_eq!(layer.radius().pixels(), [75.0; 4]);
    }

    #[test]
    fn auto_rect_collapses() {
        let layer = resolve(LayerOptions::rect().with_size("auto", "auto"), CANVAS);
        assert_eq!(layer.size(), Size::ZERO);
    }

    #[test]
    fn auto_text_height_counts_lines() {
        // 10px font: "aa bb" is 25px, "aa bb cc" 40px.
        let layer = resolve(
            LayerOptions::text("aa bb cc dd")
                .with_font_size(10.0)
                .with_size(30, "auto")
                .with_padding([2, 0]),
            CANVAS,
        );
        let text = layer.text().unwrap();
        assert_eq!(text.lines().len(), 2);
        assert_eq!(layer.height().pixels(), 2.0 * 12.0 + 4.0);
    }

    #[test]
    fn auto_text_width_is_natural() {
        let layer = resolve(
            LayerOptions::text("abc").with_font_size(10.0).with_width("auto").with_padding([0, 5]),
            CANVAS,
        );
        assert_eq!(layer.width().pixels(), 25.0);
        assert_eq!(layer.text().unwrap().lines().len(), 1);
    }

    #[test]
    fn text_inherits_from_context() {
        let parent = crate::layer::TextStyle { font_size: Some(20.0), ..Default::default() }.effective(None);
        let mut layer = Layer::new(LayerOptions::text("x")).unwrap();
        let ctx = ResolveContext { viewport: CANVAS, container: CANVAS, inherited: Some(&parent) };
        resolve_layer(&mut layer, &ctx, &mut RecordingSurface::new());
        assert_eq!(layer.text().unwrap().effective().unwrap().font.size, 20.0);
    }

    #[test]
    fn radius_follows_auto_height() {
        let layer = resolve(
            LayerOptions::text("a")
                .with_font_size(10.0)
                .with_line_height(1.0)
                .with_size(100, "auto")
                .with_radius("50%"),
            CANVAS,
        );
        assert_eq!(layer.height().pixels(), 10.0);
        assert_eq!(layer.radius().pixels(), [5.0; 4]);
    }

    #[test]
    fn image_height_follows_aspect_ratio() {
        let mut layer = Layer::new(
            LayerOptions::image("a.png").with_size(100, "auto").with_padding([5, 0]),
        )
        .unwrap();
        if let LayerKind::Image(image) = &mut layer.kind {
            image.loaded(Size::new(50.0, 25.0));
        }
        let ctx = ResolveContext { viewport: CANVAS, container: CANVAS, inherited: None };
        resolve_layer(&mut layer, &ctx, &mut RecordingSurface::new());
        assert_eq!(layer.height().pixels(), 60.0);
    }

    #[test]
    fn reassigned_value_resolves_fresh() {
        let mut layer = resolve(LayerOptions::rect().with_width("50%"), CANVAS);
        assert_eq!(layer.width().pixels(), 200.0);
        layer.apply(Property::Width("25%".into())).unwrap();
        assert!(!layer.width().is_resolved());
        let ctx = ResolveContext { viewport: CANVAS, container: CANVAS, inherited: None };
        resolve_layer(&mut layer, &ctx, &mut RecordingSurface::new());
        assert_eq!(layer.width().pixels(), 100.0);
    }

    #[test]
    fn canvas_percent_reads_container() {
        let mut canvas = Canvas::new(CanvasConfig::new()).unwrap();
        assert!(canvas.seed_size(Size::new(1000.0, 800.0), Size::new(400.0, 300.0)));
        assert_eq!(canvas.size(), Size::new(400.0, 300.0));
        assert!(!canvas.seed_size(Size::new(1000.0, 800.0), Size::new(400.0, 300.0)));
    }

    #[test]
    fn canvas_viewport_units_read_viewport() {
        let mut canvas = Canvas::new(CanvasConfig::new().with_size("50vw", "25vh")).unwrap();
        canvas.seed_size(Size::new(1000.0, 800.0), Size::new(10.0, 10.0));
        assert_eq!(canvas.size(), Size::new(500.0, 200.0));
        assert!(!canvas.seed_size(Size::new(1000.0, 800.0), Size::new(20.0, 20.0)));
        assert!(canvas.seed_size(Size::new(800.0, 800.0), Size::new(20.0, 20.0)));
        assert_eq!(canvas.size().width, 400.0);
    }

    #[test]
    fn pixel_canvas_ignores_host() {
        let mut canvas = Canvas::new(CanvasConfig::new().with_size(640, 480)).unwrap();
        assert!(!canvas.seed_size(Size::new(1.0, 1.0), Size::new(1.0, 1.0)));
        assert_eq!(canvas.size(), Size::new(640.0, 480.0));
    }
}
