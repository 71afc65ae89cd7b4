//! Transform composition and geometry queries.

use super::error::SceneError;
use super::tree::Scene;
use crate::geometry::{Affine, Decomposed, Quad};
use crate::layer::{Layer, LayerId};

/// Compose `layer`'s world matrix inside `parent` and store it with the
/// layer's corner points.
///
/// The local transform places the layer's centre at its offset plus margin,
/// then rotates, scales and skews about that centre. Returns the matrix its
/// children compose inside: the top-left of the layer's content box.
pub(crate) fn compose_layer(layer: &mut Layer, parent: Affine) -> Affine {
    let size = layer.size();
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;
    let t = layer.transform;

    let local = Affine::translation(
        layer.x.pixels() + half_w + layer.margin.left.pixels(),
        layer.y.pixels() + half_h + layer.margin.top.pixels(),
    )
    .rotate(t.rotation)
    .scale(t.scale_x, t.scale_y)
    .skew_x(t.skew_x)
    .skew_y(t.skew_y);

    let world = local.pre_multiply(parent);
    layer.matrix = world;
    layer.quad = Some(Quad::from_centered(&world, size));

    world.translate(
        -half_w + layer.padding.left.pixels(),
        -half_h + layer.padding.top.pixels(),
    )
}

impl Scene {
    fn attached_layer(&self, id: LayerId) -> Result<&Layer, SceneError> {
        let layer = self.layer_ref(id)?;
        if self.canvas_of(id).is_none() {
            return Err(SceneError::DetachedOperation);
        }
        Ok(layer)
    }

    /// World matrix at the layer's centre, from the last pass.
    pub fn world_matrix(&self, id: LayerId) -> Result<Affine, SceneError> {
        Ok(self.attached_layer(id)?.matrix)
    }

    /// Corner points from the last pass, or `None` if the layer has not
    /// been composed since it was attached.
    pub fn corners(&self, id: LayerId) -> Result<Option<Quad>, SceneError> {
        Ok(self.attached_layer(id)?.quad)
    }

    /// Decompose the layer's last world matrix, measured from its top-left
    /// corner.
    ///
    /// Approximate under a chain of independently transformed ancestors,
    /// since only the final composed matrix is decomposed.
    pub fn decompose(&self, id: LayerId) -> Result<Decomposed, SceneError> {
        let layer = self.attached_layer(id)?;
        let size = layer.size();
        Ok(layer
            .matrix
            .translate(-size.width / 2.0, -size.height / 2.0)
            .decompose())
    }
}
