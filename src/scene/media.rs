//! Image load notifications from the host.

use tracing::{trace, warn};

use super::error::SceneError;
use super::tree::Scene;
use crate::geometry::Size;
use crate::layer::{LayerId, LayerKind, PropertyKey};

impl Scene {
    /// Image layers whose source the host still has to load, with that
    /// source.
    pub fn pending_images(&self) -> Vec<(LayerId, &str)> {
        self.layers
            .iter()
            .filter_map(|(id, layer)| match &layer.kind {
                LayerKind::Image(image) if image.is_pending() => image.src().map(|src| (id, src)),
                _ => None,
            })
            .collect()
    }

    /// The host decoded `layer`'s image. Ignored once the load has failed.
    pub fn image_loaded(&mut self, layer: LayerId, natural: Size) -> Result<(), SceneError> {
        let target = self.layer_mut(layer)?;
        let kind = target.kind.name();
        let LayerKind::Image(image) = &mut target.kind else {
            return Err(SceneError::UnknownProperty { property: PropertyKey::Src, kind });
        };
        if image.loaded(natural) {
            trace!(?layer, ?natural, "image loaded");
            self.flag_redraw(layer);
        }
        Ok(())
    }

    /// The host failed to load `layer`'s image. The layer keeps its box but
    /// draws no image until its source changes.
    pub fn image_failed(&mut self, layer: LayerId) -> Result<(), SceneError> {
        let target = self.layer_mut(layer)?;
        let kind = target.kind.name();
        let LayerKind::Image(image) = &mut target.kind else {
            return Err(SceneError::UnknownProperty { property: PropertyKey::Src, kind });
        };
        warn!(?layer, src = image.src(), "image failed to load");
        if image.failed() {
            self.flag_redraw(layer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{ImageState, LayerOptions, Property};
    use crate::scene::CanvasConfig;

    #[test]
    fn pending_until_reported() {
        let mut scene = Scene::new();
        let image = scene.create_layer(LayerOptions::image("cat.png")).unwrap();
        let _rect = scene.create_layer(LayerOptions::rect()).unwrap();
        assert_eq!(scene.pending_images(), vec![(image, "cat.png")]);

        scene.image_loaded(image, Size::new(10.0, 5.0)).unwrap();
        assert!(scene.pending_images().is_empty());
        assert_eq!(
            scene.layer(image).unwrap().image().unwrap().state(),
            ImageState::Loaded { natural: Size::new(10.0, 5.0) }
        );
    }

    #[test]
    fn failure_sticks_until_source_changes() {
        let mut scene = Scene::new();
        let image = scene.create_layer(LayerOptions::image("cat.png")).unwrap();
        scene.image_failed(image).unwrap();
        scene.image_loaded(image, Size::new(10.0, 5.0)).unwrap();
        assert_eq!(scene.layer(image).unwrap().image().unwrap().state(), ImageState::Failed);

        scene.set(image, Property::Src("dog.png".into())).unwrap();
        assert_eq!(scene.pending_images(), vec![(image, "dog.png")]);
    }

    #[test]
    fn failure_after_load_enqueues_redraw() {
        let mut scene = Scene::new();
        let canvas = scene.create_canvas(CanvasConfig::new()).unwrap();
        let image = scene.create_layer(LayerOptions::image("cat.png")).unwrap();
        scene.add(canvas, image).unwrap();
        scene.image_loaded(image, Size::new(10.0, 5.0)).unwrap();
        scene.canvases[canvas].dirty.clear();

        scene.image_failed(image).unwrap();
        assert_eq!(scene.canvas(canvas).unwrap().pending_redraws(), 1);

        scene.canvases[canvas].dirty.clear();
        scene.image_failed(image).unwrap();
        assert_eq!(scene.canvas(canvas).unwrap().pending_redraws(), 0);
    }

    #[test]
    fn non_image_layers_are_rejected() {
        let mut scene = Scene::new();
        let rect = scene.create_layer(LayerOptions::rect()).unwrap();
        assert_eq!(
            scene.image_failed(rect),
            Err(SceneError::UnknownProperty { property: PropertyKey::Src, kind: "Rect" })
        );
    }
}
