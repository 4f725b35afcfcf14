//! Swatchpop — an anchored color-swatch popup widget.
//!
//! Swatchpop attaches to input fields on a host-provided render surface,
//! replacing each with a clickable swatch icon and a flyout grid of
//! selectable colors. Opening a popup runs the placement engine: the
//! preferred side is tried first, then a fixed fallback order of candidate
//! sides, each tested against the viewport, and a directional arrow is
//! attached pointing at the anchor icon.
//!
//! The crate never talks to a concrete document tree. Hosts implement
//! [`RenderSurface`] over their real layout tree and forward pointer events
//! to the controller; [`MemorySurface`] ships for headless hosts and tests.
//!
//! # Example
//!
//! ```
//! use swatchpop::{BindTarget, MemorySurface, PickerOptions, SwatchPicker};
//! use swatchpop::placement::Position;
//! use swatchpop::surface::RenderSurface;
//!
//! let mut surface = MemorySurface::new();
//! let root = surface.root();
//! let field = surface.create_node("swatchpop");
//! surface.append_child(root, field);
//!
//! let mut picker = SwatchPicker::with_options(
//!     surface,
//!     PickerOptions::default()
//!         .with_grid_cols(5)
//!         .with_position(Position::Bottom),
//! );
//!
//! picker.color_selected.connect(|selection| {
//!     println!("picked {}", selection.token);
//! });
//!
//! picker.bind(BindTarget::Marked)?;
//! assert!(picker.is_bound(field));
//! # Ok::<(), swatchpop::PickerError>(())
//! ```

pub mod config;
pub mod error;
pub mod picker;
pub mod placement;
pub mod surface;

pub use config::{DEFAULT_PALETTE, PickerOptions};
pub use error::{PickerError, PickerResult};
pub use picker::{BindTarget, ColorSelection, SwatchPicker};
pub use placement::{
    ARROW_CLEARANCE, FALLBACK_ORDER, Placement, Position, arrow_offset, calculate_coordinates,
};
pub use surface::{MemorySurface, NodeId, RenderSurface};
