//! The layout and paint pass over one canvas.

use std::rc::Rc;

use tracing::debug;

use super::canvas::CanvasId;
use super::compose::compose_layer;
use super::error::SceneError;
use super::resolve::{resolve_layer, ResolveContext};
use super::tree::Scene;
use crate::geometry::{Affine, Rect, Size};
use crate::layer::{EffectiveText, ImageState, Layer, LayerId, LayerKind};
use crate::surface::{BoxPaint, DrawingSurface, TextPaint};

/// A layer waiting on the traversal stack, with what it inherits.
struct Pending {
    id: LayerId,
    parent_matrix: Affine,
    container: Size,
    inherited: Option<Rc<EffectiveText>>,
}

impl Scene {
    /// Clear the surface, then resolve, compose and paint every layer of
    /// `canvas` in pre-order. Returns how many layers were visited.
    ///
    /// The walk uses an explicit stack, so tree depth is bounded by memory
    /// rather than the call stack.
    pub(crate) fn render_pass<S: DrawingSurface + ?Sized>(
        &mut self,
        canvas_id: CanvasId,
        surface: &mut S,
    ) -> Result<usize, SceneError> {
        let canvas = self.canvas_ref(canvas_id)?;
        let size = canvas.size();
        let world = canvas.world;
        let scale = canvas.backing_scale();
        let device = Affine::scaling(scale, scale);

        surface.clear(size);
        if let Some(color) = canvas.background.as_deref() {
            surface.save();
            surface.set_transform(&(device * world));
            surface.fill_background(color, Rect::new(0.0, 0.0, size.width, size.height));
            surface.restore();
        }

        let mut stack: Vec<Pending> = canvas
            .layers
            .iter()
            .rev()
            .map(|id| Pending { id, parent_matrix: world, container: size, inherited: None })
            .collect();

        let mut visited = 0;
        while let Some(pending) = stack.pop() {
            if self.canvas_of(pending.id) != Some(canvas_id) {
                continue;
            }
            let Some(layer) = self.layers.get_mut(pending.id) else {
                continue;
            };

            let ctx = ResolveContext {
                viewport: size,
                container: pending.container,
                inherited: pending.inherited.as_deref(),
            };
            resolve_layer(layer, &ctx, surface);
            let child_matrix = compose_layer(layer, pending.parent_matrix);
            paint_layer(layer, device, surface);
            visited += 1;

            let inherited = match layer.text().and_then(|text| text.effective()) {
                Some(effective) => Some(Rc::new(effective.clone())),
                None => pending.inherited,
            };
            let container = layer.size();
            for child in self.children(pending.id).iter().rev() {
                stack.push(Pending {
                    id: *child,
                    parent_matrix: child_matrix,
                    container,
                    inherited: inherited.clone(),
                });
            }
        }

        debug!(canvas = ?canvas_id, layers = visited, scale, "render pass");
        Ok(visited)
    }
}

/// Paint one layer in its local space: box first, then content.
///
/// `device` maps canvas pixels to backing-store pixels.
fn paint_layer<S: DrawingSurface + ?Sized>(layer: &Layer, device: Affine, surface: &mut S) {
    let rect = Rect::centered(layer.size());
    let [top, right, bottom, left] = layer.padding.pixels();
    let content = rect.inset(top, right, bottom, left);
    let paint = &layer.paint;
    let is_text = matches!(layer.kind, LayerKind::Text(_));

    surface.save();
    surface.set_transform(&(device * layer.matrix));

    // Text layers outline and shadow their glyphs rather than the box.
    let box_visible = if is_text { paint.background.is_some() } else { paint.is_visible() };
    if box_visible {
        surface.draw_box(&BoxPaint {
            rect,
            radii: layer.radius.pixels(),
            background: paint.background.as_deref(),
            stroke: if is_text { None } else { paint.stroke() },
            shadow: if is_text { None } else { paint.shadow() },
        });
    }

    match &layer.kind {
        LayerKind::Rect => {}
        LayerKind::Text(text) => {
            if let Some(effective) = text.effective() {
                let advance = effective.line_advance();
                for (index, line) in text.lines().iter().enumerate() {
                    if line.text.is_empty() {
                        continue;
                    }
                    surface.draw_text(&TextPaint {
                        text: &line.text,
                        x: content.x,
                        y: content.y + index as f64 * advance,
                        font: &effective.font,
                        color: &effective.color,
                        stroke: paint.stroke(),
                        shadow: paint.shadow(),
                    });
                }
            }
        }
        LayerKind::Image(image) => {
            // Failed and pending images are skipped without error.
            if let (Some(src), ImageState::Loaded { .. }) = (image.src(), image.state()) {
                surface.draw_image(src, content);
            }
        }
    }

    surface.restore();
}
