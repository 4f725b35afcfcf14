//! Error types for the widget crate.

use thiserror::Error;

use crate::surface::NodeId;

/// Errors that can occur while managing picker bindings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// The target field is not attached to a parent in the surface tree, so
    /// there is no document position to anchor the synthesized widgets to.
    #[error("target {0:?} is not attached to a renderable tree")]
    TargetDetached(NodeId),
}

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;
