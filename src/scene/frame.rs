//! Frame scheduling: dirty queue, pixel scaling, frame-rate sampling and the
//! per-frame tick.

use std::time::Duration;

use tracing::debug;

use super::canvas::{Canvas, CanvasId};
use super::error::SceneError;
use super::tree::Scene;
use crate::geometry::Size;
use crate::layer::LayerId;
use crate::surface::DrawingSurface;

// ---------------------------------------------------------------------------
// DirtyQueue
// ---------------------------------------------------------------------------

/// Something that needs repainting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyEntry {
    Layer(LayerId),
    /// The canvas itself: size, pan, zoom, background or membership changed.
    Canvas,
}

/// Redraw requests gathered between frames.
///
/// Duplicates are kept and order is irrelevant; any live entry triggers a
/// full pass, and the queue is drained as a whole afterwards.
#[derive(Debug, Default)]
pub struct DirtyQueue {
    entries: Vec<DirtyEntry>,
}

impl DirtyQueue {
    pub fn push_layer(&mut self, layer: LayerId) {
        self.entries.push(DirtyEntry::Layer(layer));
    }

    pub fn push_canvas(&mut self) {
        self.entries.push(DirtyEntry::Canvas);
    }

    pub fn entries(&self) -> &[DirtyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// FrameRate
// ---------------------------------------------------------------------------

const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second sampler over one-second windows.
#[derive(Debug, Default)]
pub struct FrameRate {
    elapsed: Duration,
    frames: u32,
    sampled: Option<f64>,
}

impl FrameRate {
    /// Count a frame that took `delta`. Once a full window has accumulated,
    /// commits `frames / seconds` and starts a new window.
    pub fn record(&mut self, delta: Duration) -> Option<f64> {
        self.elapsed += delta;
        self.frames += 1;
        if self.elapsed >= SAMPLE_WINDOW {
            self.sampled = Some(f64::from(self.frames) / self.elapsed.as_secs_f64());
            self.elapsed = Duration::ZERO;
            self.frames = 0;
        }
        self.sampled
    }

    /// The last committed rate.
    pub fn sampled(&self) -> Option<f64> {
        self.sampled
    }
}

// ---------------------------------------------------------------------------
// Frame input and report
// ---------------------------------------------------------------------------

/// What the host knows at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Time since the previous frame.
    pub delta: Duration,
    /// Host viewport size, the reference for `vw`/`vh` canvas sizes.
    pub viewport: Size,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f64,
    /// Content box of the element containing the canvas, the reference for
    /// percent sizes. Falls back to the viewport.
    pub container: Option<Size>,
}

impl FrameInput {
    pub fn new(delta: Duration, viewport: Size) -> Self {
        Self { delta, viewport, pixel_ratio: 1.0, container: None }
    }

    /// Set the device pixel ratio (builder).
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Set the container size (builder).
    pub fn with_container(mut self, container: Size) -> Self {
        self.container = Some(container);
        self
    }

    /// The pixel ratio, with nonsense values read as 1.
    fn effective_pixel_ratio(&self) -> f64 {
        if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
            self.pixel_ratio
        } else {
            1.0
        }
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Whether a layout and paint pass ran.
    pub rendered: bool,
    /// Layers visited by the pass.
    pub painted: usize,
    /// Whether the backing store was resized.
    pub rescaled: bool,
    /// Frames per second over the last full sampling window.
    pub frame_rate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tick
// ---------------------------------------------------------------------------

impl Canvas {
    /// Size the backing store for `pixel_ratio`.
    fn apply_pixel_scaling<S: DrawingSurface + ?Sized>(&mut self, pixel_ratio: f64, surface: &mut S) {
        let logical = self.size();
        self.backing = if pixel_ratio > 1.0 { logical.scale(pixel_ratio) } else { logical };
        self.pixel_ratio = pixel_ratio;
        self.update_pixel_scaling = false;
        surface.resize_backing(logical, pixel_ratio);
        debug!(?logical, pixel_ratio, backing = ?self.backing, "pixel scaling updated");
    }
}

impl Scene {
    /// Run one frame for `canvas`.
    ///
    /// 1. Reseed the canvas size if the host sizes changed.
    /// 2. Resize the backing store if the pixel ratio or size changed; this
    ///    forces a pass.
    /// 3. Recompose the world matrix if pan, zoom or size changed.
    /// 4. If the dirty queue holds a live entry (or a pass is forced), run
    ///    the layout and paint pass.
    /// 5. Drain the queue and sample the frame rate.
    ///
    /// Entries for layers that have since left the canvas are ignored.
    pub fn tick<S: DrawingSurface + ?Sized>(
        &mut self,
        canvas_id: CanvasId,
        input: &FrameInput,
        surface: &mut S,
    ) -> Result<FrameReport, SceneError> {
        let pixel_ratio = input.effective_pixel_ratio();
        let container = input.container.unwrap_or(input.viewport);

        let canvas = self.canvas_mut(canvas_id)?;
        if canvas.seed_size(input.viewport, container) {
            canvas.update_pixel_scaling = true;
            canvas.update_world = true;
            canvas.dirty.push_canvas();
        }

        let rescaled = canvas.pixel_ratio != pixel_ratio || canvas.update_pixel_scaling;
        if rescaled {
            canvas.apply_pixel_scaling(pixel_ratio, surface);
        }
        if canvas.update_world {
            canvas.compose_world();
        }

        let live = self.live_redraws(canvas_id);
        let rendered = rescaled || live > 0;
        let painted = if rendered { self.render_pass(canvas_id, surface)? } else { 0 };

        let canvas = self.canvas_mut(canvas_id)?;
        canvas.dirty.clear();
        let frame_rate = canvas.frame_rate.record(input.delta);

        Ok(FrameReport { rendered, painted, rescaled, frame_rate })
    }

    /// Run the layout and paint pass now, whatever the queue holds, and drain
    /// the queue. Returns the number of layers visited.
    pub fn render<S: DrawingSurface + ?Sized>(
        &mut self,
        canvas_id: CanvasId,
        surface: &mut S,
    ) -> Result<usize, SceneError> {
        let canvas = self.canvas_mut(canvas_id)?;
        if canvas.update_world {
            canvas.compose_world();
        }
        let painted = self.render_pass(canvas_id, surface)?;
        self.canvas_mut(canvas_id)?.dirty.clear();
        Ok(painted)
    }

    /// Queue entries that still refer to this canvas.
    fn live_redraws(&self, canvas_id: CanvasId) -> usize {
        self.canvases.get(canvas_id).map_or(0, |canvas| {
            canvas
                .dirty
                .entries()
                .iter()
                .filter(|entry| match entry {
                    DirtyEntry::Canvas => true,
                    DirtyEntry::Layer(layer) => self.canvas_of(*layer) == Some(canvas_id),
                })
                .count()
        })
    }
}
