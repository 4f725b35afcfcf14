//! Swatch picker controller.
//!
//! This module provides [`SwatchPicker`], the widget controller that owns the
//! configuration and the binding lifecycle for any number of target fields on
//! one render surface. Binding a field hides it, synthesizes a wrapper with a
//! clickable swatch icon and a flyout popup of color swatches in its place,
//! and keeps the field as the system of record for the selected token.
//!
//! The embedding application forwards pointer events to
//! [`handle_click`](SwatchPicker::handle_click) and
//! [`handle_pointer_release`](SwatchPicker::handle_pointer_release); the
//! controller routes them to toggle, selection, and outside-release
//! dismissal.
//!
//! # Example
//!
//! ```
//! use swatchpop::{BindTarget, MemorySurface, SwatchPicker};
//! use swatchpop::surface::RenderSurface;
//!
//! let mut surface = MemorySurface::new();
//! let root = surface.root();
//! let field = surface.create_node("swatchpop");
//! surface.append_child(root, field);
//!
//! let mut picker = SwatchPicker::new(surface);
//! picker.bind(BindTarget::Node(field))?;
//!
//! // Forwarded pointer events drive the widget
//! let icon = picker.icon_node(field).unwrap();
//! picker.handle_click(icon);
//! assert!(picker.is_open(field));
//! # Ok::<(), swatchpop::PickerError>(())
//! ```
//!
//! # Signals
//!
//! - `color_selected(ColorSelection)`: a swatch was selected
//! - `popup_opened(NodeId)`: a binding's popup was opened
//! - `popup_closed(NodeId)`: a binding's popup was closed

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};
use swatchpop_core::Signal;

use crate::config::PickerOptions;
use crate::error::{PickerError, PickerResult};
use crate::placement::{self, Position};
use crate::surface::{NodeId, RenderSurface};

/// Class names the picker stamps onto surface nodes.
///
/// Hosts style these; the picker only guarantees when they are present.
pub mod classes {
    use crate::placement::Position;

    /// Marker class that opts a field into [`BindTarget::Marked`](super::BindTarget::Marked).
    pub const MARKER: &str = "swatchpop";
    /// Carried by a field while it is bound.
    pub const BOUND: &str = "sp-bound";
    /// The wrapper standing in the field's document position.
    pub const WRAP: &str = "sp-wrap";
    /// The clickable swatch icon.
    pub const ICON: &str = "sp-icon";
    /// The flyout popup.
    pub const POPUP: &str = "sp-popup";
    /// The popup's optional label.
    pub const LABEL: &str = "sp-popup-label";
    /// The swatch grid inside the popup.
    pub const COLORS: &str = "sp-colors";
    /// One selectable color swatch.
    pub const SWATCH: &str = "sp-swatch";
    /// The directional arrow pointing at the anchor.
    pub const ARROW: &str = "sp-arrow";
    /// Carried by the popup while it is open.
    pub const OPEN: &str = "sp-open";

    /// Position class carried by the popup while placed at `position`.
    pub fn position_class(position: Position) -> String {
        format!("sp-pos-{}", position.name())
    }

    /// Direction class carried by the arrow for `position`.
    pub fn arrow_class(position: Position) -> String {
        format!("sp-arrow-{}", position.name())
    }
}

new_key_type! {
    /// Identifier of one live binding in the controller's registry.
    pub struct BindingId;
}

/// Which fields a [`bind`](SwatchPicker::bind) call resolves to.
#[derive(Debug, Clone)]
pub enum BindTarget {
    /// One explicit field node.
    Node(NodeId),
    /// An explicit collection of field nodes.
    Nodes(Vec<NodeId>),
    /// Every node carrying [`classes::MARKER`].
    Marked,
}

/// Payload of the `color_selected` signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSelection {
    /// The bound field whose value was written.
    pub target: NodeId,
    /// The selected color token.
    pub token: String,
}

/// What a synthesized node means to the click router.
#[derive(Debug, Clone, Copy)]
enum NodeRole {
    Icon(BindingId),
    Swatch(BindingId, usize),
}

/// One live association between a target field and its synthesized UI.
struct Binding {
    target: NodeId,
    wrapper: NodeId,
    icon: NodeId,
    popup: NodeId,
    swatches: Vec<NodeId>,
    /// Token list snapshot the swatches were built from.
    tokens: Vec<String>,
    /// Preferred position snapshot.
    preferred: Position,
    selected: String,
    open: bool,
    /// Position actually applied while open.
    applied: Option<Position>,
    /// Arrow node, present only while open.
    arrow: Option<NodeId>,
}

/// The widget controller.
///
/// Owns one render surface, one configuration, and the registry of live
/// bindings. All state lives in the bindings; every side effect lands on the
/// surface.
pub struct SwatchPicker<S: RenderSurface> {
    surface: S,
    options: PickerOptions,
    bindings: SlotMap<BindingId, Binding>,
    by_target: HashMap<NodeId, BindingId>,
    roles: HashMap<NodeId, NodeRole>,

    /// Signal emitted when a swatch is selected.
    pub color_selected: Signal<ColorSelection>,
    /// Signal emitted when a binding's popup opens.
    pub popup_opened: Signal<NodeId>,
    /// Signal emitted when a binding's popup closes.
    pub popup_closed: Signal<NodeId>,
}

impl<S: RenderSurface> SwatchPicker<S> {
    /// Create a picker with default options.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, PickerOptions::default())
    }

    /// Create a picker with explicit options.
    pub fn with_options(surface: S, options: PickerOptions) -> Self {
        Self {
            surface,
            options,
            bindings: SlotMap::with_key(),
            by_target: HashMap::new(),
            roles: HashMap::new(),
            color_selected: Signal::new(),
            popup_opened: Signal::new(),
            popup_closed: Signal::new(),
        }
    }

    /// Replace the configuration used by future binds.
    ///
    /// Live bindings keep the option snapshot they were built with until they
    /// are rebound.
    pub fn set_options(&mut self, options: PickerOptions) {
        self.options = options;
    }

    /// The current configuration.
    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// The owned render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the owned render surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // =========================================================================
    // Binding Lifecycle
    // =========================================================================

    /// Bind every field the target resolves to.
    ///
    /// A field that is already bound is unbound first, so repeated calls
    /// rebind cleanly without duplicating icons or popups. Fails with
    /// [`PickerError::TargetDetached`] when a resolved field has no parent to
    /// anchor the synthesized widgets to.
    pub fn bind(&mut self, target: BindTarget) -> PickerResult<()> {
        let targets = match target {
            BindTarget::Node(node) => vec![node],
            BindTarget::Nodes(nodes) => nodes,
            BindTarget::Marked => self.surface.nodes_with_class(classes::MARKER),
        };
        for target in targets {
            self.bind_one(target)?;
        }
        Ok(())
    }

    fn bind_one(&mut self, target: NodeId) -> PickerResult<()> {
        if self.by_target.contains_key(&target) {
            self.unbind(target);
        }
        if self.surface.parent(target).is_none() {
            return Err(PickerError::TargetDetached(target));
        }

        let options = self.options.clone();

        // Hide and mark the field; it stays the system of record for the value.
        self.surface.set_style(target, "display", "none");
        self.surface.add_class(target, classes::BOUND);

        // The wrapper takes over the field's document position.
        let wrapper = self.surface.create_node(classes::WRAP);
        self.surface.insert_after(target, wrapper);
        self.surface.detach(target);
        self.surface.append_child(wrapper, target);

        // The icon displays the current selection.
        let icon = self.surface.create_node(classes::ICON);
        if let Some(size) = options.icon_size() {
            self.surface.set_style(icon, "width", size);
            self.surface.set_style(icon, "height", size);
            self.surface.set_style(icon, "border-radius", size);
        }
        // PickerOptions guarantees a non-empty palette
        let selected = self
            .surface
            .value(target)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| options.colors()[0].clone());
        self.surface.set_style(icon, "background-color", &selected);
        self.surface.append_child(wrapper, icon);

        // The popup: optional label plus the swatch grid, hidden until toggled.
        let popup = self.surface.create_node(classes::POPUP);
        self.surface.set_style(popup, "display", "none");
        if let Some(label) = options.label() {
            let label_node = self.surface.create_node(classes::LABEL);
            self.surface.set_text(label_node, label);
            self.surface.append_child(popup, label_node);
        }
        let grid = self.surface.create_node(classes::COLORS);
        if let Some(cols) = options.grid_cols() {
            self.surface
                .set_style(grid, "grid-template-columns", &format!("repeat({cols}, 1fr)"));
        }
        let mut swatches = Vec::with_capacity(options.colors().len());
        for token in options.colors() {
            let swatch = self.surface.create_node(classes::SWATCH);
            self.surface.set_style(swatch, "background-color", token);
            if let Some(size) = options.swatch_size() {
                self.surface.set_style(swatch, "width", size);
                self.surface.set_style(swatch, "height", size);
            }
            self.surface.append_child(grid, swatch);
            swatches.push(swatch);
        }
        self.surface.append_child(popup, grid);
        self.surface.append_child(wrapper, popup);

        let swatch_count = swatches.len();
        let swatch_nodes = swatches.clone();
        let binding_id = self.bindings.insert(Binding {
            target,
            wrapper,
            icon,
            popup,
            swatches,
            tokens: options.colors().to_vec(),
            preferred: options.position(),
            selected,
            open: false,
            applied: None,
            arrow: None,
        });
        self.by_target.insert(target, binding_id);
        self.roles.insert(icon, NodeRole::Icon(binding_id));
        for (index, swatch) in swatch_nodes.into_iter().enumerate() {
            self.roles.insert(swatch, NodeRole::Swatch(binding_id, index));
        }

        tracing::debug!(
            target: "swatchpop::picker",
            field = ?target,
            swatches = swatch_count,
            "bound field"
        );
        Ok(())
    }

    /// Unbind a field, restoring it to its former document position.
    ///
    /// A no-op when the field is not bound.
    pub fn unbind(&mut self, target: NodeId) {
        let Some(binding_id) = self.by_target.remove(&target) else {
            tracing::trace!(target: "swatchpop::picker", field = ?target, "unbind on unbound target, ignoring");
            return;
        };
        let Some(binding) = self.bindings.remove(binding_id) else {
            return;
        };

        self.roles.remove(&binding.icon);
        for swatch in &binding.swatches {
            self.roles.remove(swatch);
        }

        // Put the field back where the wrapper stood, then drop the wrapper
        // (and with it the icon, popup, and any arrow).
        self.surface.detach(target);
        self.surface.insert_after(binding.wrapper, target);
        self.surface.remove_subtree(binding.wrapper);
        self.surface.remove_class(target, classes::BOUND);
        self.surface.remove_style(target, "display");

        tracing::debug!(target: "swatchpop::picker", field = ?target, "unbound field");
    }

    // =========================================================================
    // Open/Close
    // =========================================================================

    /// Toggle the popup of a bound field. No-op for unbound fields.
    pub fn toggle(&mut self, target: NodeId) {
        if let Some(&binding_id) = self.by_target.get(&target) {
            self.toggle_binding(binding_id);
        }
    }

    fn toggle_binding(&mut self, binding_id: BindingId) {
        let Some(binding) = self.bindings.get(binding_id) else {
            return;
        };
        if binding.open {
            self.close_binding(binding_id);
        } else {
            self.open_binding(binding_id);
        }
    }

    fn open_binding(&mut self, binding_id: BindingId) {
        let Some(binding) = self.bindings.get(binding_id) else {
            return;
        };
        let (target, icon, popup, preferred) =
            (binding.target, binding.icon, binding.popup, binding.preferred);

        // Show first so the surface can report the popup's laid-out size.
        self.surface.add_class(popup, classes::OPEN);
        self.surface.set_style(popup, "display", "block");

        let anchor_rect = self.surface.bounding_rect(icon);
        let popup_rect = self.surface.bounding_rect(popup);
        let viewport = self.surface.viewport();
        let placement =
            placement::calculate_coordinates(anchor_rect, popup_rect, preferred, viewport);

        self.surface.set_style(popup, "left", &px(placement.left));
        self.surface.set_style(popup, "top", &px(placement.top));
        self.surface
            .add_class(popup, &classes::position_class(placement.position));

        // A fresh arrow per open; close removes it again.
        let arrow = self.surface.create_node(classes::ARROW);
        self.surface
            .add_class(arrow, &classes::arrow_class(placement.position));
        self.surface.append_child(popup, arrow);
        let arrow_size = self.surface.bounding_rect(arrow).size;
        let offset = placement::arrow_offset(placement.position, popup_rect.size, arrow_size);
        self.surface.set_style(arrow, "left", &px(offset.x));
        self.surface.set_style(arrow, "top", &px(offset.y));

        let binding = &mut self.bindings[binding_id];
        binding.open = true;
        binding.applied = Some(placement.position);
        binding.arrow = Some(arrow);

        tracing::trace!(
            target: "swatchpop::picker",
            field = ?target,
            position = placement.position.name(),
            fits = placement.fits,
            "opened popup"
        );
        self.popup_opened.emit(target);
    }

    fn close_binding(&mut self, binding_id: BindingId) {
        let Some(binding) = self.bindings.get_mut(binding_id) else {
            return;
        };
        if !binding.open {
            return;
        }
        let (target, popup) = (binding.target, binding.popup);
        let arrow = binding.arrow.take();
        let applied = binding.applied.take();
        binding.open = false;

        if let Some(arrow) = arrow {
            self.surface.remove_subtree(arrow);
        }
        if let Some(position) = applied {
            self.surface
                .remove_class(popup, &classes::position_class(position));
        }
        self.surface.remove_class(popup, classes::OPEN);
        self.surface.set_style(popup, "display", "none");

        tracing::trace!(target: "swatchpop::picker", field = ?target, "closed popup");
        self.popup_closed.emit(target);
    }

    // =========================================================================
    // Event Routing
    // =========================================================================

    /// Route a pointer click on a surface node.
    ///
    /// Icon clicks toggle the popup; swatch clicks select that swatch's
    /// token. Returns `true` when the click hit a picker element.
    pub fn handle_click(&mut self, node: NodeId) -> bool {
        match self.roles.get(&node).copied() {
            Some(NodeRole::Icon(binding_id)) => {
                self.toggle_binding(binding_id);
                true
            }
            Some(NodeRole::Swatch(binding_id, index)) => {
                self.select(binding_id, index);
                true
            }
            None => false,
        }
    }

    /// Dismiss open popups on a pointer release outside of them.
    ///
    /// The one document-level dismissal path: every open binding whose icon
    /// or popup subtree does not contain the release target is closed.
    /// `None` (a release on nothing) closes all open popups.
    pub fn handle_pointer_release(&mut self, released_on: Option<NodeId>) {
        let mut to_close = Vec::new();
        for (binding_id, binding) in self.bindings.iter() {
            if !binding.open {
                continue;
            }
            let inside = released_on.is_some_and(|node| {
                self.surface.contains(binding.icon, node)
                    || self.surface.contains(binding.popup, node)
            });
            if !inside {
                to_close.push(binding_id);
            }
        }
        for binding_id in to_close {
            self.close_binding(binding_id);
        }
    }

    fn select(&mut self, binding_id: BindingId, index: usize) {
        let Some(binding) = self.bindings.get(binding_id) else {
            return;
        };
        let Some(token) = binding.tokens.get(index).cloned() else {
            return;
        };
        let (target, icon) = (binding.target, binding.icon);

        // The popup is necessarily open when a swatch click arrives, but the
        // close is explicit: a toggle here would reopen a closed popup.
        self.surface.set_value(target, &token);
        self.close_binding(binding_id);
        self.surface.set_style(icon, "background-color", &token);
        self.bindings[binding_id].selected = token.clone();

        tracing::trace!(target: "swatchpop::picker", field = ?target, token = %token, "selected color");
        self.color_selected.emit(ColorSelection { target, token });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether a field is currently bound.
    pub fn is_bound(&self, target: NodeId) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Whether a bound field's popup is currently open.
    pub fn is_open(&self, target: NodeId) -> bool {
        self.binding(target).is_some_and(|binding| binding.open)
    }

    /// The currently selected token of a bound field.
    pub fn selected_color(&self, target: NodeId) -> Option<&str> {
        self.binding(target).map(|binding| binding.selected.as_str())
    }

    /// The position applied to a bound field's popup, while it is open.
    pub fn applied_position(&self, target: NodeId) -> Option<Position> {
        self.binding(target).and_then(|binding| binding.applied)
    }

    /// The icon node synthesized for a bound field.
    pub fn icon_node(&self, target: NodeId) -> Option<NodeId> {
        self.binding(target).map(|binding| binding.icon)
    }

    /// The popup node synthesized for a bound field.
    pub fn popup_node(&self, target: NodeId) -> Option<NodeId> {
        self.binding(target).map(|binding| binding.popup)
    }

    /// The arrow node of a bound field's popup, while it is open.
    pub fn arrow_node(&self, target: NodeId) -> Option<NodeId> {
        self.binding(target).and_then(|binding| binding.arrow)
    }

    fn binding(&self, target: NodeId) -> Option<&Binding> {
        self.by_target
            .get(&target)
            .and_then(|&binding_id| self.bindings.get(binding_id))
    }
}

fn px(value: f32) -> String {
    format!("{value}px")
}

static_assertions::assert_impl_all!(SwatchPicker<crate::surface::MemorySurface>: Send, Sync);
