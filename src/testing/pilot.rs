//! Pilot: drive a canvas headlessly.

use std::time::Duration;

use crate::geometry::{Point, Size};
use crate::layer::{LayerId, LayerOptions};
use crate::scene::{CanvasConfig, CanvasId, FrameInput, FrameReport, Scene, SceneError};

use super::recorder::RecordingSurface;

/// Frame delta used by [`Pilot::frame`], roughly 60 fps.
pub const FRAME: Duration = Duration::from_millis(16);

/// A scene with one canvas, a fixed host viewport and a
/// [`RecordingSurface`].
///
/// ```
/// use gilt_canvas::geometry::Point;
/// use gilt_canvas::layer::LayerOptions;
/// use gilt_canvas::testing::Pilot;
///
/// let mut pilot = Pilot::new(400.0, 300.0);
/// let card = pilot.add(LayerOptions::rect().with_position(10, 10).with_size(100, 100)).unwrap();
/// pilot.frame().unwrap();
/// assert_eq!(pilot.hit(Point::new(50.0, 50.0)), Some(card));
/// ```
pub struct Pilot {
    scene: Scene,
    canvas: CanvasId,
    surface: RecordingSurface,
    viewport: Size,
    pixel_ratio: f64,
}

impl Pilot {
    /// A canvas filling a `width` x `height` viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(CanvasConfig::new(), width, height)
    }

    /// A canvas built from `config` inside a `width` x `height` viewport.
    ///
    /// # Panics
    ///
    /// Panics if `config` holds an invalid size.
    pub fn with_config(config: CanvasConfig, width: f64, height: f64) -> Self {
        let mut scene = Scene::new();
        let canvas = scene
            .create_canvas(config)
            .unwrap_or_else(|err| panic!("invalid canvas config: {err}"));
        Self {
            scene,
            canvas,
            surface: RecordingSurface::new(),
            viewport: Size::new(width, height),
            pixel_ratio: 1.0,
        }
    }

    // ── Scene building ───────────────────────────────────────────────

    /// Create a layer and attach it to the canvas.
    pub fn add(&mut self, options: LayerOptions) -> Result<LayerId, SceneError> {
        let id = self.scene.create_layer(options)?;
        self.scene.add(self.canvas, id)?;
        Ok(id)
    }

    /// Create a layer as the last child of `parent`.
    pub fn add_child(&mut self, parent: LayerId, options: LayerOptions) -> Result<LayerId, SceneError> {
        let id = self.scene.create_layer(options)?;
        self.scene.add_child(parent, id)?;
        Ok(id)
    }

    // ── Host simulation ──────────────────────────────────────────────

    /// Run one frame.
    pub fn frame(&mut self) -> Result<FrameReport, SceneError> {
        let input = FrameInput::new(FRAME, self.viewport).with_pixel_ratio(self.pixel_ratio);
        self.scene.tick(self.canvas, &input, &mut self.surface)
    }

    /// Change the host viewport. Takes effect on the next frame.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    /// Change the device pixel ratio. Takes effect on the next frame.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
    }

    /// Move the pointer to `point`.
    pub fn hover(&mut self, point: Point) -> Result<Option<LayerId>, SceneError> {
        self.scene.pointer_move(self.canvas, point)
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The frontmost layer under `point`, as of the last frame.
    pub fn hit(&self, point: Point) -> Option<LayerId> {
        self.scene.hit_test(self.canvas, point)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }

    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RecordingSurface {
        &mut self.surface
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_clears_and_paints() {
        let mut pilot = Pilot::new(200.0, 100.0);
        pilot.add(LayerOptions::rect().with_size(10, 10).with_background("red")).unwrap();
        let report = pilot.frame().unwrap();
        assert_eq!(report.painted, 1);
        assert_eq!(pilot.surface().matching("clear"), ["clear 200x100"]);
        assert_eq!(pilot.surface().matching("box"), ["box -5,-5 10x10 fill=red"]);
    }

    #[test]
    fn resize_takes_effect_next_frame() {
        let mut pilot = Pilot::new(200.0, 100.0);
        pilot.frame().unwrap();
        pilot.resize(300.0, 100.0);
        assert!(pilot.frame().unwrap().rescaled);
        let canvas = pilot.scene().canvas(pilot.canvas()).unwrap();
        assert_eq!(canvas.size(), Size::new(300.0, 100.0));
    }

    #[test]
    fn hover_reports_layer() {
        let mut pilot = Pilot::new(200.0, 100.0);
        let id = pilot.add(LayerOptions::rect().with_size(50, 50)).unwrap();
        pilot.frame().unwrap();
        assert_eq!(pilot.hover(Point::new(25.0, 25.0)).unwrap(), Some(id));
    }
}
