//! Arena-backed in-memory render surface.

use std::collections::HashMap;

use slotmap::SlotMap;
use swatchpop_core::{Rect, Size};

use super::{NodeId, RenderSurface};

/// Internal data stored for each node.
#[derive(Default)]
struct NodeData {
    classes: Vec<String>,
    styles: HashMap<String, String>,
    text: Option<String>,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: Rect,
}

/// An in-memory [`RenderSurface`] for headless hosts and tests.
///
/// Nodes live in an arena keyed by [`NodeId`]; removal of a subtree cascades
/// to all descendants. The surface performs no layout of its own — hosts and
/// tests inject each node's rectangle via
/// [`set_layout_rect`](Self::set_layout_rect) and the viewport via
/// [`set_viewport`](Self::set_viewport).
pub struct MemorySurface {
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    viewport: Rect,
}

impl MemorySurface {
    /// Create a surface with an empty root node and a 1024x768 viewport.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::default());
        Self {
            nodes,
            root,
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
        }
    }

    /// The root node every attached subtree hangs off.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Replace the viewport size.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = Rect::from_origin_size(swatchpop_core::Point::ZERO, size);
    }

    /// Inject the laid-out rectangle reported for a node.
    pub fn set_layout_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.layout = rect;
        }
    }

    /// Whether the node is still alive in the arena.
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// The node's children, in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    /// The node's position among its parent's children.
    pub fn child_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.nodes.get(node)?.parent?;
        self.nodes[parent].children.iter().position(|&c| c == node)
    }

    /// Read back an inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(node)?
            .styles
            .get(property)
            .map(String::as_str)
    }

    /// Read back the node's text content.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node)?.text.as_deref()
    }

    /// Collect a node and all its descendants, depth-first.
    fn collect_subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut collected = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(data) = self.nodes.get(n) {
                collected.push(n);
                stack.extend(data.children.iter().copied());
            }
        }
        collected
    }

    fn unlink_from_parent(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|data| data.parent) else {
            return;
        };
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            parent_data.children.retain(|&c| c != node);
        }
        self.nodes[node].parent = None;
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for MemorySurface {
    fn create_node(&mut self, class: &str) -> NodeId {
        let id = self.nodes.insert(NodeData {
            classes: vec![class.to_string()],
            ..NodeData::default()
        });
        tracing::trace!(target: "swatchpop::surface", ?id, class, "created node");
        id
    }

    fn remove_subtree(&mut self, node: NodeId) {
        if !self.nodes.contains_key(node) {
            return;
        }
        self.unlink_from_parent(node);
        let subtree = self.collect_subtree(node);
        tracing::trace!(target: "swatchpop::surface", ?node, count = subtree.len(), "removing subtree");
        for n in subtree {
            self.nodes.remove(n);
        }
    }

    fn detach(&mut self, node: NodeId) {
        self.unlink_from_parent(node);
    }

    fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        if !self.nodes.contains_key(node) {
            return;
        }
        let Some(parent) = self.nodes.get(anchor).and_then(|data| data.parent) else {
            return;
        };
        self.unlink_from_parent(node);
        let index = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == anchor)
            .map(|i| i + 1)
            .unwrap_or(self.nodes[parent].children.len());
        self.nodes[parent].children.insert(index, node);
        self.nodes[node].parent = Some(parent);
    }

    fn append_child(&mut self, parent: NodeId, node: NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(node) {
            return;
        }
        self.unlink_from_parent(node);
        self.nodes[parent].children.push(node);
        self.nodes[node].parent = Some(parent);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node)
            && !data.classes.iter().any(|c| c == class)
        {
            data.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| data.classes.iter().any(|c| c == class))
            .map(|(id, _)| id)
            .collect()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.styles.remove(property);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.text = Some(text.to_string());
        }
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.nodes.get(node)?.value.clone()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.value = Some(value.to_string());
        }
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.nodes
            .get(node)
            .map(|data| data.layout)
            .unwrap_or(Rect::ZERO)
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_after_preserves_order() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let a = surface.create_node("a");
        let b = surface.create_node("b");
        let c = surface.create_node("c");
        surface.append_child(root, a);
        surface.append_child(root, c);

        surface.insert_after(a, b);
        assert_eq!(surface.children(root), &[a, b, c]);
        assert_eq!(surface.child_index(b), Some(1));
    }

    #[test]
    fn test_detach_keeps_subtree_alive() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let outer = surface.create_node("outer");
        let inner = surface.create_node("inner");
        surface.append_child(root, outer);
        surface.append_child(outer, inner);

        surface.detach(outer);
        assert!(surface.is_alive(outer));
        assert!(surface.is_alive(inner));
        assert_eq!(surface.parent(outer), None);
        assert_eq!(surface.parent(inner), Some(outer));
        assert_eq!(surface.children(root), &[] as &[NodeId]);
    }

    #[test]
    fn test_remove_subtree_cascades() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let outer = surface.create_node("outer");
        let inner = surface.create_node("inner");
        let sibling = surface.create_node("sibling");
        surface.append_child(root, outer);
        surface.append_child(outer, inner);
        surface.append_child(root, sibling);

        surface.remove_subtree(outer);
        assert!(!surface.is_alive(outer));
        assert!(!surface.is_alive(inner));
        assert!(surface.is_alive(sibling));
        assert_eq!(surface.children(root), &[sibling]);
    }

    #[test]
    fn test_classes_and_styles() {
        let mut surface = MemorySurface::new();
        let node = surface.create_node("swatch");

        surface.add_class(node, "open");
        surface.add_class(node, "open");
        assert!(surface.has_class(node, "swatch"));
        assert!(surface.has_class(node, "open"));

        surface.remove_class(node, "open");
        assert!(!surface.has_class(node, "open"));

        surface.set_style(node, "display", "none");
        assert_eq!(surface.style(node, "display"), Some("none"));
        surface.remove_style(node, "display");
        assert_eq!(surface.style(node, "display"), None);
    }

    #[test]
    fn test_contains_walks_ancestry() {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let outer = surface.create_node("outer");
        let inner = surface.create_node("inner");
        let other = surface.create_node("other");
        surface.append_child(root, outer);
        surface.append_child(outer, inner);
        surface.append_child(root, other);

        assert!(surface.contains(outer, inner));
        assert!(surface.contains(outer, outer));
        assert!(!surface.contains(outer, other));
    }

    #[test]
    fn test_stale_handles_are_harmless() {
        let mut surface = MemorySurface::new();
        let node = surface.create_node("gone");
        surface.remove_subtree(node);

        surface.set_style(node, "display", "none");
        surface.add_class(node, "open");
        assert_eq!(surface.value(node), None);
        assert_eq!(surface.bounding_rect(node), Rect::ZERO);
        assert_eq!(surface.parent(node), None);
    }
}
