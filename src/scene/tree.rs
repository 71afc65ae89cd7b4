//! Scene arena and tree operations: attach, detach, re-parent, reorder,
//! property updates.

use slotmap::{SecondaryMap, SlotMap};
use tracing::trace;

use super::canvas::{Canvas, CanvasConfig, CanvasId, Cursor};
use super::error::SceneError;
use crate::collection::OrderedSet;
use crate::layer::{Layer, LayerId, LayerOptions, Property};

const NO_CHILDREN: &[LayerId] = &[];

/// Where [`Scene::move_to`] should put a layer among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    Index(usize),
    /// The current position of another sibling.
    Sibling(LayerId),
}

impl From<usize> for MoveTarget {
    fn from(index: usize) -> Self {
        MoveTarget::Index(index)
    }
}

impl From<LayerId> for MoveTarget {
    fn from(layer: LayerId) -> Self {
        MoveTarget::Sibling(layer)
    }
}

/// Owns every layer and canvas.
///
/// Layers and canvases live in `SlotMap` arenas and are addressed by
/// [`LayerId`] and [`CanvasId`]. Tree links are kept in secondary maps. A
/// layer is in exactly one of three states: detached (no parent, no canvas),
/// top-level (member of a canvas's layer set), or nested (member of a
/// parent's children, sharing the parent's canvas or lack of one).
pub struct Scene {
    pub(crate) layers: SlotMap<LayerId, Layer>,
    pub(crate) canvases: SlotMap<CanvasId, Canvas>,
    pub(crate) children: SecondaryMap<LayerId, OrderedSet<LayerId>>,
    parent: SecondaryMap<LayerId, LayerId>,
    attached: SecondaryMap<LayerId, CanvasId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            layers: SlotMap::with_key(),
            canvases: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            attached: SecondaryMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Creation and lookup
    // -----------------------------------------------------------------------

    /// Create a canvas. It renders on its first [`tick`](Self::tick).
    pub fn create_canvas(&mut self, config: CanvasConfig) -> Result<CanvasId, SceneError> {
        let canvas = Canvas::new(config)?;
        let id = self.canvases.insert(canvas);
        trace!(?id, "canvas created");
        Ok(id)
    }

    /// Create a detached layer.
    pub fn create_layer(&mut self, options: LayerOptions) -> Result<LayerId, SceneError> {
        let layer = Layer::new(options)?;
        let id = self.layers.insert(layer);
        self.children.insert(id, OrderedSet::new());
        trace!(?id, "layer created");
        Ok(id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.get(id)
    }

    pub fn contains_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(id)
    }

    /// Number of live layers, attached or not.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub(crate) fn layer_ref(&self, id: LayerId) -> Result<&Layer, SceneError> {
        self.layers.get(id).ok_or(SceneError::MissingLayer(id))
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Result<&mut Layer, SceneError> {
        self.layers.get_mut(id).ok_or(SceneError::MissingLayer(id))
    }

    pub(crate) fn canvas_ref(&self, id: CanvasId) -> Result<&Canvas, SceneError> {
        self.canvases.get(id).ok_or(SceneError::MissingCanvas(id))
    }

    pub(crate) fn canvas_mut(&mut self, id: CanvasId) -> Result<&mut Canvas, SceneError> {
        self.canvases.get_mut(id).ok_or(SceneError::MissingCanvas(id))
    }

    // -----------------------------------------------------------------------
    // Structure queries
    // -----------------------------------------------------------------------

    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.parent.get(id).copied()
    }

    /// Children in paint order. Empty if the layer has none or does not exist.
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        self.children
            .get(id)
            .map(OrderedSet::as_slice)
            .unwrap_or(NO_CHILDREN)
    }

    /// The canvas this layer currently belongs to.
    pub fn canvas_of(&self, id: LayerId) -> Option<CanvasId> {
        self.attached.get(id).copied()
    }

    /// Parent chain, nearest first. Does not include `id`.
    pub fn ancestors(&self, id: LayerId) -> Vec<LayerId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first walk of `start` and its descendants.
    pub fn walk_depth_first(&self, start: LayerId) -> Vec<LayerId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.layers.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    // -----------------------------------------------------------------------
    // Canvas membership
    // -----------------------------------------------------------------------

    /// Attach `layer` to `canvas` as a top-level layer.
    ///
    /// The layer is first removed from wherever it was (another canvas or a
    /// parent). Cached geometry of the whole subtree is dropped.
    pub fn add(&mut self, canvas: CanvasId, layer: LayerId) -> Result<(), SceneError> {
        self.canvas_ref(canvas)?;
        self.layer_ref(layer)?;

        match (self.parent(layer), self.canvas_of(layer)) {
            (Some(parent), _) => {
                self.remove_child(parent, layer)?;
            }
            (None, Some(current)) if current != canvas => {
                self.remove(current, layer)?;
            }
            _ => {}
        }

        self.assign_canvas(layer, Some(canvas), true);
        self.canvas_mut(canvas)?.layers.add(layer);
        self.flag_redraw(layer);
        trace!(?canvas, ?layer, "layer attached");
        Ok(())
    }

    /// Detach a top-level `layer` from `canvas`. Returns whether it was a
    /// member; nested layers are left alone.
    pub fn remove(&mut self, canvas: CanvasId, layer: LayerId) -> Result<bool, SceneError> {
        let target = self.canvas_mut(canvas)?;
        if !target.layers.delete(layer) {
            return Ok(false);
        }
        target.dirty.push_layer(layer);
        target.dirty.push_canvas();
        self.assign_canvas(layer, None, false);
        trace!(?canvas, ?layer, "layer detached");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Parenting
    // -----------------------------------------------------------------------

    /// Make `child` the last child of `parent`.
    ///
    /// Fails with [`SceneError::InvalidHierarchy`] if `child` is `parent` or
    /// one of its ancestors.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) -> Result<(), SceneError> {
        self.layer_ref(parent)?;
        self.layer_ref(child)?;
        if parent == child {
            return Err(SceneError::InvalidHierarchy { reason: "a layer cannot be its own child" });
        }
        if self.ancestors(parent).contains(&child) {
            return Err(SceneError::InvalidHierarchy { reason: "a layer cannot be a child of its descendant" });
        }

        match (self.parent(child), self.canvas_of(child)) {
            (Some(old), _) => {
                self.remove_child(old, child)?;
            }
            (None, Some(canvas)) => {
                self.remove(canvas, child)?;
            }
            (None, None) => {}
        }

        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.add(child);
        }
        let canvas = self.canvas_of(parent);
        self.assign_canvas(child, canvas, true);
        self.flag_redraw(parent);
        trace!(?parent, ?child, "child added");
        Ok(())
    }

    /// Detach `child` from `parent`. Returns whether it was a child.
    pub fn remove_child(&mut self, parent: LayerId, child: LayerId) -> Result<bool, SceneError> {
        self.layer_ref(parent)?;
        let removed = self
            .children
            .get_mut(parent)
            .is_some_and(|siblings| siblings.delete(child));
        if !removed {
            return Ok(false);
        }

        if let Some(canvas) = self.canvas_of(child).and_then(|c| self.canvases.get_mut(c)) {
            canvas.dirty.push_layer(child);
        }
        self.parent.remove(child);
        self.assign_canvas(child, None, false);
        self.flag_redraw(parent);
        trace!(?parent, ?child, "child removed");
        Ok(true)
    }

    /// Set or clear the canvas of `root` and its descendants.
    fn assign_canvas(&mut self, root: LayerId, canvas: Option<CanvasId>, reset: bool) {
        for id in self.walk_depth_first(root) {
            let previous = match canvas {
                Some(canvas) => self.attached.insert(id, canvas),
                None => self.attached.remove(id),
            };
            if let Some(old) = previous.filter(|&old| Some(old) != canvas) {
                if let Some(old) = self.canvases.get_mut(old) {
                    if old.hovered == Some(id) {
                        old.hovered = None;
                        old.cursor = Cursor::Default;
                    }
                }
            }
            if reset {
                if let Some(layer) = self.layers.get_mut(id) {
                    layer.reset_geometry();
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Z-order
    // -----------------------------------------------------------------------

    /// Paint `layer` after all its siblings.
    pub fn move_to_front(&mut self, layer: LayerId) -> Result<(), SceneError> {
        self.reorder(layer, |siblings| Ok(siblings.len().saturating_sub(1)))
    }

    /// Paint `layer` before all its siblings.
    pub fn move_to_back(&mut self, layer: LayerId) -> Result<(), SceneError> {
        self.reorder(layer, |_| Ok(0))
    }

    /// Move `layer` to an index among its siblings, or to a sibling's slot.
    pub fn move_to(&mut self, layer: LayerId, target: impl Into<MoveTarget>) -> Result<(), SceneError> {
        match target.into() {
            MoveTarget::Index(index) => self.reorder(layer, |_| Ok(index)),
            MoveTarget::Sibling(other) => self.reorder(layer, |siblings| {
                siblings.index_of(other).ok_or(SceneError::NotASibling(other))
            }),
        }
    }

    /// A detached layer has no siblings; reordering it does nothing.
    fn reorder(
        &mut self,
        layer: LayerId,
        target: impl FnOnce(&OrderedSet<LayerId>) -> Result<usize, SceneError>,
    ) -> Result<(), SceneError> {
        self.layer_ref(layer)?;
        let siblings = match self.parent.get(layer).copied() {
            Some(parent) => self.children.get_mut(parent),
            None => match self.attached.get(layer).copied() {
                Some(canvas) => self.canvases.get_mut(canvas).map(|c| &mut c.layers),
                None => None,
            },
        };
        let Some(siblings) = siblings else {
            return Ok(());
        };
        let Some(current) = siblings.index_of(layer) else {
            return Ok(());
        };
        let index = target(&*siblings)?;
        siblings.move_item(current, index)?;
        self.flag_redraw(layer);
        trace!(?layer, from = current, to = index, "layer reordered");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Properties and lifetime
    // -----------------------------------------------------------------------

    /// Apply a property update. Visible changes enqueue a redraw.
    ///
    /// Returns whether the change was visible.
    pub fn set(&mut self, layer: LayerId, property: Property) -> Result<bool, SceneError> {
        let key = property.key();
        let changed = self.layer_mut(layer)?.apply(property)?;
        if changed {
            self.flag_redraw(layer);
        }
        trace!(?layer, %key, changed, "property set");
        Ok(changed)
    }

    /// Enqueue `layer` on its canvas's dirty queue. No-op when detached.
    pub fn flag_redraw(&mut self, layer: LayerId) {
        if let Some(canvas) = self.canvas_of(layer).and_then(|c| self.canvases.get_mut(c)) {
            canvas.dirty.push_layer(layer);
        }
    }

    /// Drop a detached layer and its descendants from the arena. Returns how
    /// many layers were dropped.
    pub fn destroy(&mut self, layer: LayerId) -> Result<usize, SceneError> {
        self.layer_ref(layer)?;
        if self.parent(layer).is_some() || self.canvas_of(layer).is_some() {
            return Err(SceneError::InvalidHierarchy { reason: "only detached layers can be destroyed" });
        }
        let subtree = self.walk_depth_first(layer);
        for &id in &subtree {
            self.layers.remove(id);
            self.children.remove(id);
            self.parent.remove(id);
            self.attached.remove(id);
        }
        trace!(?layer, count = subtree.len(), "layers destroyed");
        Ok(subtree.len())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
