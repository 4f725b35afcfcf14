//! Core systems for Swatchpop.
//!
//! This crate provides the foundational components shared by the widget kit:
//!
//! - **Geometry**: viewport-relative [`Point`], [`Size`], and [`Rect`] types
//!   used for anchor, popup, and viewport rectangles
//! - **Signal/Slot System**: type-safe notification between the widget
//!   controller and the embedding application
//!
//! # Signal Example
//!
//! ```
//! use swatchpop_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//!
//! value_changed.disconnect(conn_id);
//! ```

pub mod geometry;
pub mod signal;

pub use geometry::{Point, Rect, Size};
pub use signal::{ConnectionId, Signal};
