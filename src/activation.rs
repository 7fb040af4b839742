//! Elementwise activation functions for dense layers.

use std::fmt;

use ndarray::Array2;

/// Activation applied after a layer's affine map.
///
/// Only rectified-linear is supported; the enum exists so that deepening can
/// gate on activation capabilities rather than assume them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activation {
    /// Rectified linear unit: `max(x, 0)`.
    #[default]
    Relu,
}

impl Activation {
    /// Apply the activation elementwise, in place.
    pub fn apply(&self, x: &mut Array2<f32>) {
        match self {
            Activation::Relu => x.mapv_inplace(|v| v.max(0.0)),
        }
    }

    /// Apply the activation to a single value.
    #[inline]
    pub fn apply_scalar(&self, v: f32) -> f32 {
        match self {
            Activation::Relu => v.max(0.0),
        }
    }

    /// Whether `f(f(x)) == f(x)` holds for all non-negative `x`.
    ///
    /// Deepening inserts an identity-weighted layer after an already-activated
    /// output; the inserted layer reproduces its input exactly only when the
    /// activation is a no-op on non-negative values. True for rectified-linear.
    #[inline]
    pub fn is_idempotent_on_nonnegative(&self) -> bool {
        match self {
            Activation::Relu => true,
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Relu => write!(f, "relu"),
        }
    }
}
