//! The scene: layers arranged under canvases, resolved, composed, painted
//! and hit-tested.
//!
//! A [`Scene`] owns every layer and canvas. The host drives each canvas by
//! calling [`Scene::tick`] once per frame with its viewport and pixel ratio
//! and a [`DrawingSurface`](crate::surface::DrawingSurface). Tree and
//! property changes between frames only enqueue redraw requests; the next
//! tick runs at most one pass per canvas.

pub mod canvas;
mod compose;
pub mod error;
pub mod frame;
mod hit;
mod media;
mod render;
mod resolve;
pub mod tree;

pub use canvas::{Canvas, CanvasConfig, CanvasId, Cursor};
pub use error::SceneError;
pub use frame::{DirtyEntry, DirtyQueue, FrameInput, FrameRate, FrameReport};
pub use tree::{MoveTarget, Scene};
