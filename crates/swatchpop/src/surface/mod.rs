//! Render-surface abstraction.
//!
//! The picker never touches a concrete document tree. Everything it needs
//! from the embedding page goes through [`RenderSurface`]: queries (parent
//! lookup, bounding boxes, viewport size, field values) and commands (create
//! node, tree edits, class/style/text/value mutation). A host backs the trait
//! with its real layout tree; [`MemorySurface`] backs it with an in-memory
//! arena for headless embedding and tests.
//!
//! Class names, style properties, and color tokens are all opaque strings to
//! the surface — the picker decides what they mean, the host decides how they
//! render.

use slotmap::new_key_type;
use swatchpop_core::Rect;

mod memory;

pub use memory::MemorySurface;

new_key_type! {
    /// A stable handle to one node owned by a render surface.
    ///
    /// Handles become invalid when the node's subtree is removed; surface
    /// implementations treat stale handles as no-ops on the command side and
    /// return empty answers on the query side.
    pub struct NodeId;
}

/// The rendering/layout seam between the picker and its host.
///
/// Tree-shape invariants the picker relies on:
///
/// - a node has at most one parent, and detaching it keeps the node (and its
///   subtree) alive for re-insertion
/// - [`remove_subtree`](Self::remove_subtree) destroys a node together with
///   all of its descendants
/// - [`bounding_rect`](Self::bounding_rect) answers in the same
///   viewport-relative coordinate space as [`viewport`](Self::viewport),
///   whose rectangle has a zero origin
pub trait RenderSurface {
    /// Create a detached node carrying one initial class.
    fn create_node(&mut self, class: &str) -> NodeId;

    /// Destroy a node and its whole subtree.
    fn remove_subtree(&mut self, node: NodeId);

    /// Remove a node from its parent, keeping it (and its subtree) alive.
    fn detach(&mut self, node: NodeId);

    /// Insert `node` into `anchor`'s parent, directly after `anchor`.
    /// No-op when `anchor` is detached.
    fn insert_after(&mut self, anchor: NodeId, node: NodeId);

    /// Append `node` as the last child of `parent`.
    fn append_child(&mut self, parent: NodeId, node: NodeId);

    /// The node's parent, if it is attached to one.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Add a class to the node (idempotent).
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Remove a class from the node.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Check whether the node carries a class.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// All live nodes carrying a class.
    fn nodes_with_class(&self, class: &str) -> Vec<NodeId>;

    /// Set an inline style property on the node.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Remove an inline style property from the node.
    fn remove_style(&mut self, node: NodeId, property: &str);

    /// Set the node's text content.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// The node's current field value, if it has one.
    fn value(&self, node: NodeId) -> Option<String>;

    /// Set the node's field value.
    fn set_value(&mut self, node: NodeId, value: &str);

    /// The node's laid-out bounding rectangle, viewport-relative.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// The viewport rectangle (zero origin).
    fn viewport(&self) -> Rect;

    /// Check whether `node` is `ancestor` or lies inside its subtree.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}
