//! Hit testing against the corner points stored by the last pass, and
//! pointer tracking.

use super::canvas::{CanvasId, Cursor};
use super::error::SceneError;
use super::tree::Scene;
use crate::geometry::Point;
use crate::layer::LayerId;

impl Scene {
    /// Every layer of `canvas` whose quad contains `point`, front to back.
    ///
    /// Paint order is pre-order, so the frontmost layer is the last one
    /// visited. Subtrees belonging to another canvas are skipped, as are
    /// layers that have not been composed yet.
    pub fn layers_at(&self, canvas_id: CanvasId, point: Point) -> Vec<LayerId> {
        let Some(canvas) = self.canvases.get(canvas_id) else {
            return Vec::new();
        };

        let mut hits = Vec::new();
        let mut stack: Vec<LayerId> = canvas.layers.iter().rev().collect();
        while let Some(id) = stack.pop() {
            if self.canvas_of(id) != Some(canvas_id) {
                continue;
            }
            let Some(layer) = self.layers.get(id) else {
                continue;
            };
            if layer.quad.is_some_and(|quad| quad.contains(point)) {
                hits.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        hits.reverse();
        hits
    }

    /// The frontmost layer of `canvas` under `point`: the deepest one, with
    /// later siblings winning over earlier ones.
    pub fn hit_test(&self, canvas_id: CanvasId, point: Point) -> Option<LayerId> {
        self.layers_at(canvas_id, point).first().copied()
    }

    /// Track the pointer over `canvas`. Returns the hovered layer and updates
    /// the canvas cursor.
    pub fn pointer_move(&mut self, canvas_id: CanvasId, point: Point) -> Result<Option<LayerId>, SceneError> {
        let hovered = self.hit_test(canvas_id, point);
        let canvas = self.canvas_mut(canvas_id)?;
        canvas.hovered = hovered;
        canvas.cursor = match hovered {
            Some(_) => Cursor::Pointer,
            None => Cursor::Default,
        };
        Ok(hovered)
    }

    /// The pointer left `canvas`.
    pub fn pointer_leave(&mut self, canvas_id: CanvasId) -> Result<(), SceneError> {
        let canvas = self.canvas_mut(canvas_id)?;
        canvas.hovered = None;
        canvas.cursor = Cursor::Default;
        Ok(())
    }
}
