//! Errors from scene operations.

use thiserror::Error;

use super::canvas::CanvasId;
use crate::collection::IndexOutOfRange;
use crate::layer::{LayerId, PropertyKey};
use crate::unit::ValueError;

/// Every fallible scene operation returns this. Nothing is retried
/// internally, and a failed call leaves the scene unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A size or position token could not be parsed.
    #[error(transparent)]
    InvalidValue(#[from] ValueError),
    #[error("{property} is not settable on {kind} layers")]
    UnknownProperty { property: PropertyKey, kind: &'static str },
    #[error("invalid hierarchy: {reason}")]
    InvalidHierarchy { reason: &'static str },
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),
    /// A reorder target is not in the same sibling collection.
    #[error("layer {0:?} is not a sibling")]
    NotASibling(LayerId),
    /// Geometry was queried on a layer that belongs to no canvas.
    #[error("layer is not attached to a canvas")]
    DetachedOperation,
    #[error("unknown layer {0:?}")]
    MissingLayer(LayerId),
    #[error("unknown canvas {0:?}")]
    MissingCanvas(CanvasId),
}
