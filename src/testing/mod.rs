//! Headless testing helpers: a recording surface and a Pilot.
//!
//! [`RecordingSurface`] implements the drawing contract by logging each call
//! as text. [`Pilot`] wraps a scene with one canvas and a fixed viewport so
//! tests can build layers, run frames and check hits in a few lines.

pub mod pilot;
pub mod recorder;

pub use pilot::Pilot;
pub use recorder::RecordingSurface;
