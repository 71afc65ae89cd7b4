//! Layers: the nodes of the scene.
//!
//! A [`Layer`] owns its geometry (as unresolved values), transform
//! parameters, paint style and kind-specific content. Tree structure is kept
//! by the [`Scene`](crate::scene::Scene).

pub mod image;
pub mod node;
pub mod property;
pub mod style;
pub mod text;

pub use image::{ImageSource, ImageState};
pub use node::{Layer, LayerId, LayerKind, LayerOptions, LocalTransform, TextContent};
pub use property::{Property, PropertyKey};
pub use style::{EffectiveText, PaintStyle, Shadow, Stroke, TextStyle};
pub use text::TextLine;
