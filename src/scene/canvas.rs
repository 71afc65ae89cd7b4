//! Canvas: a root of the scene with its own coordinate system, dirty queue
//! and frame bookkeeping.

use slotmap::new_key_type;
use tracing::trace;

use super::error::SceneError;
use super::frame::{DirtyQueue, FrameRate};
use super::tree::Scene;
use crate::collection::OrderedSet;
use crate::geometry::{Affine, Point, Size};
use crate::layer::LayerId;
use crate::unit::{Axis, ResolvedValue, ValueError, ValueInput};

new_key_type! {
    /// Unique identifier for a canvas.
    pub struct CanvasId;
}

// ---------------------------------------------------------------------------
// CanvasConfig
// ---------------------------------------------------------------------------

/// Configuration for a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Pixels, a percentage of the host container, or `vw`/`vh` of the host
    /// viewport.
    pub width: ValueInput,
    pub height: ValueInput,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    /// Colour painted under every layer.
    pub background: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: ValueInput::from("100%"),
            height: ValueInput::from("100%"),
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            background: None,
        }
    }
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size (builder).
    pub fn with_size(mut self, width: impl Into<ValueInput>, height: impl Into<ValueInput>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    /// Set the zoom factor (builder).
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the pan offset (builder).
    pub fn with_pan(mut self, pan_x: f64, pan_y: f64) -> Self {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self
    }

    /// Set the background colour (builder).
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Pointer cursor the host should show over a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// A layer is under the pointer.
    Pointer,
}

/// A root of the scene.
#[derive(Debug)]
pub struct Canvas {
    pub(crate) layers: OrderedSet<LayerId>,
    pub(crate) width: ResolvedValue,
    pub(crate) height: ResolvedValue,
    pub(crate) zoom: f64,
    pub(crate) pan: Point,
    pub(crate) background: Option<String>,
    /// Pan and zoom, composed about the canvas centre.
    pub(crate) world: Affine,
    pub(crate) dirty: DirtyQueue,
    /// Ratio the backing store was last sized for. Zero before the first frame.
    pub(crate) pixel_ratio: f64,
    pub(crate) backing: Size,
    pub(crate) update_pixel_scaling: bool,
    pub(crate) update_world: bool,
    /// Host sizes seen by the last frame.
    pub(crate) viewport: Option<Size>,
    pub(crate) container: Option<Size>,
    pub(crate) frame_rate: FrameRate,
    pub(crate) hovered: Option<LayerId>,
    pub(crate) cursor: Cursor,
}

impl Canvas {
    pub(crate) fn new(config: CanvasConfig) -> Result<Self, ValueError> {
        let mut dirty = DirtyQueue::default();
        dirty.push_canvas();
        Ok(Self {
            layers: OrderedSet::new(),
            width: ResolvedValue::parse(config.width, Axis::Width)?,
            height: ResolvedValue::parse(config.height, Axis::Height)?,
            zoom: config.zoom,
            pan: Point::new(config.pan_x, config.pan_y),
            background: config.background,
            world: Affine::IDENTITY,
            dirty,
            pixel_ratio: 0.0,
            backing: Size::ZERO,
            update_pixel_scaling: true,
            update_world: true,
            viewport: None,
            container: None,
            frame_rate: FrameRate::default(),
            hovered: None,
            cursor: Cursor::Default,
        })
    }

    /// Top-level layers in paint order.
    pub fn layers(&self) -> &[LayerId] {
        self.layers.as_slice()
    }

    pub fn width(&self) -> &ResolvedValue {
        &self.width
    }

    pub fn height(&self) -> &ResolvedValue {
        &self.height
    }

    /// Resolved size in CSS pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width.pixels(), self.height.pixels())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// The world matrix applied to every top-level layer.
    pub fn world(&self) -> Affine {
        self.world
    }

    /// Backing store size in device pixels.
    pub fn backing_size(&self) -> Size {
        self.backing
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Entries waiting in the dirty queue, stale ones included.
    pub fn pending_redraws(&self) -> usize {
        self.dirty.len()
    }

    /// Device pixels per logical pixel in the backing store. One until the
    /// first frame and for ratios at or below one.
    pub fn backing_scale(&self) -> f64 {
        if self.pixel_ratio > 1.0 {
            self.pixel_ratio
        } else {
            1.0
        }
    }

    /// Frames per second over the last full sampling window.
    pub fn frame_rate(&self) -> Option<f64> {
        self.frame_rate.sampled()
    }

    pub fn hovered(&self) -> Option<LayerId> {
        self.hovered
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Recompose the world matrix from pan and zoom.
    pub(crate) fn compose_world(&mut self) {
        let center = Point::new(self.width.pixels() / 2.0, self.height.pixels() / 2.0);
        self.world = Affine::translation(self.pan.x, self.pan.y).scale_about(self.zoom, self.zoom, center);
        self.update_world = false;
    }
}

// ---------------------------------------------------------------------------
// Canvas operations
// ---------------------------------------------------------------------------

impl Scene {
    /// Set the zoom factor. Takes effect on the next tick.
    pub fn set_zoom(&mut self, canvas: CanvasId, zoom: f64) -> Result<(), SceneError> {
        let target = self.canvas_mut(canvas)?;
        target.zoom = zoom;
        target.update_world = true;
        target.dirty.push_canvas();
        trace!(?canvas, zoom, "zoom set");
        Ok(())
    }

    /// Set the pan offset. Takes effect on the next tick.
    pub fn set_pan(&mut self, canvas: CanvasId, pan_x: f64, pan_y: f64) -> Result<(), SceneError> {
        let target = self.canvas_mut(canvas)?;
        target.pan = Point::new(pan_x, pan_y);
        target.update_world = true;
        target.dirty.push_canvas();
        trace!(?canvas, pan_x, pan_y, "pan set");
        Ok(())
    }

    /// Replace the canvas size. Relative sizes are seeded from the host on
    /// the next tick.
    pub fn set_canvas_size(
        &mut self,
        canvas: CanvasId,
        width: impl Into<ValueInput>,
        height: impl Into<ValueInput>,
    ) -> Result<(), SceneError> {
        let width = ResolvedValue::parse(width, Axis::Width)?;
        let height = ResolvedValue::parse(height, Axis::Height)?;
        let target = self.canvas_mut(canvas)?;
        target.width = width;
        target.height = height;
        target.update_pixel_scaling = true;
        target.update_world = true;
        target.dirty.push_canvas();
        trace!(?canvas, "canvas resized");
        Ok(())
    }

    pub fn set_background(&mut self, canvas: CanvasId, color: Option<String>) -> Result<(), SceneError> {
        let target = self.canvas_mut(canvas)?;
        if target.background != color {
            target.background = color;
            target.dirty.push_canvas();
        }
        Ok(())
    }
}
