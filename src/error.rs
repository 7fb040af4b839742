//! Shared error type for network morphing operations.

use crate::activation::Activation;

/// Errors produced when constructing or morphing a network.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MorphError {
    /// The network does not meet a structural precondition for the operation.
    #[error("invalid network state: {0}")]
    InvalidState(String),

    /// A supplied index or size is outside the documented valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Tensors disagree on a shared dimension.
    ///
    /// Raised defensively when adjacent layers violate the wiring invariant
    /// before a transform is attempted, or when a batch has the wrong width.
    /// Signals corruption upstream rather than a bad argument.
    #[error("shape mismatch: {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    /// Deepening requires an activation that is idempotent on non-negative
    /// inputs; the identity-layer trick does not hold otherwise.
    #[error("activation {0} is not idempotent on non-negative inputs")]
    UnsupportedActivation(Activation),
}
