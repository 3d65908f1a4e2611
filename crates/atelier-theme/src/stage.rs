#![forbid(unsafe_code)]

//! The host surface the theme engine mutates: a root marker and named
//! layers of presentation nodes.
//!
//! The stage stands in for the document the original surface renders into.
//! Decorations are spawned into the layer named [`DECORATION_LAYER`]; a
//! stage built without that layer models a page without a decoration host,
//! and dependent steps skip with a log line instead of failing.

use std::collections::BTreeMap;

/// Fixed id of the decoration host layer.
pub const DECORATION_LAYER: &str = "festival-decorations";

/// Opaque handle to a node inside a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// A presentation node: position and size are percentages of the viewport,
/// opacity runs 0.0..=1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub class: &'static str,
    pub glyph: &'static str,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub animation: Option<&'static str>,
    pub phase_delay_ms: u64,
}

/// A named layer holding nodes.
#[derive(Debug, Default)]
pub struct Layer {
    nodes: BTreeMap<NodeId, Node>,
}

impl Layer {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Node)> {
        self.nodes.iter()
    }

    pub fn count_class(&self, class: &str) -> usize {
        self.nodes.values().filter(|n| n.class == class).count()
    }

    fn remove(&mut self, id: NodeId) -> bool {
        self.nodes.remove(&id).is_some()
    }

    fn remove_class(&mut self, class: &str) {
        self.nodes.retain(|_, n| n.class != class);
    }
}

/// The mutable host surface: one root marker, named layers, an optional
/// root effect tag.
#[derive(Debug)]
pub struct Stage {
    marker: Option<String>,
    effect_tag: Option<&'static str>,
    layers: BTreeMap<String, Layer>,
    next_id: u64,
}

impl Stage {
    /// A bare stage with no layers at all.
    pub fn bare() -> Self {
        Self {
            marker: None,
            effect_tag: None,
            layers: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// The usual stage: bare plus the decoration host layer.
    pub fn with_decoration_layer() -> Self {
        let mut stage = Self::bare();
        stage.layers.insert(DECORATION_LAYER.to_string(), Layer::default());
        stage
    }

    /// Replace the root marker. Exactly one marker exists at a time.
    pub fn set_marker(&mut self, marker: impl Into<String>) {
        self.marker = Some(marker.into());
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn set_effect_tag(&mut self, tag: Option<&'static str>) {
        self.effect_tag = tag;
    }

    pub fn effect_tag(&self) -> Option<&'static str> {
        self.effect_tag
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Insert a node into a layer, returning its handle. A missing layer
    /// is a no-op signalled by `None`.
    pub fn insert(&mut self, layer: &str, node: Node) -> Option<NodeId> {
        let Some(target) = self.layers.get_mut(layer) else {
            tracing::debug!(layer, "layer absent; node not inserted");
            return None;
        };
        let id = NodeId(self.next_id);
        self.next_id += 1;
        target.nodes.insert(id, node);
        Some(id)
    }

    /// Remove a node by handle. Removing from a missing layer or with a
    /// stale handle is a no-op.
    pub fn remove(&mut self, layer: &str, id: NodeId) -> bool {
        self.layers
            .get_mut(layer)
            .map(|l| l.remove(id))
            .unwrap_or(false)
    }

    /// Remove every node of a class from a layer.
    pub fn remove_class(&mut self, layer: &str, class: &str) {
        if let Some(l) = self.layers.get_mut(layer) {
            l.remove_class(class);
        }
    }

    /// Total node count in the decoration layer (0 when absent).
    pub fn decoration_count(&self) -> usize {
        self.layer(DECORATION_LAYER).map(Layer::len).unwrap_or(0)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::with_decoration_layer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(class: &'static str) -> Node {
        Node {
            class,
            glyph: "*",
            x: 50.0,
            y: 50.0,
            size: 1.0,
            opacity: 0.5,
            animation: None,
            phase_delay_ms: 0,
        }
    }

    #[test]
    fn insert_into_missing_layer_is_a_no_op() {
        let mut stage = Stage::bare();
        assert_eq!(stage.insert(DECORATION_LAYER, node("x")), None);
        assert_eq!(stage.decoration_count(), 0);
    }

    #[test]
    fn marker_is_replaced_not_accumulated() {
        let mut stage = Stage::with_decoration_layer();
        stage.set_marker("theme-default");
        stage.set_marker("theme-christmas");
        assert_eq!(stage.marker(), Some("theme-christmas"));
    }

    #[test]
    fn remove_class_only_touches_that_class() {
        let mut stage = Stage::with_decoration_layer();
        stage.insert(DECORATION_LAYER, node("decor-lantern"));
        stage.insert(DECORATION_LAYER, node("decor-rabbit"));
        stage.remove_class(DECORATION_LAYER, "decor-rabbit");
        let layer = stage.layer(DECORATION_LAYER).unwrap();
        assert_eq!(layer.count_class("decor-lantern"), 1);
        assert_eq!(layer.count_class("decor-rabbit"), 0);
    }

    #[test]
    fn stale_handles_remove_nothing() {
        let mut stage = Stage::with_decoration_layer();
        let id = stage.insert(DECORATION_LAYER, node("x")).unwrap();
        assert!(stage.remove(DECORATION_LAYER, id));
        assert!(!stage.remove(DECORATION_LAYER, id));
    }
}
