//! Deepening transform: build an identity-initialized layer to insert after
//! an existing one.

use ndarray::{Array1, Array2, ArrayView2};

/// Build the weights of an identity-preserving layer.
///
/// `weights` is the weight matrix of the layer immediately preceding the
/// insertion point, shape `(D_in, D_out)`. The returned pair is the identity
/// matrix `I(D_out)` and a zero bias of length `D_out`.
///
/// Inserting a layer with these weights reproduces its input exactly, given
/// that the preceding output has already passed through an activation that is
/// idempotent on non-negative values: `relu(I · v + 0) == v` for `v >= 0`.
/// Callers must gate on
/// [`Activation::is_idempotent_on_nonnegative`](crate::Activation::is_idempotent_on_nonnegative)
/// before inserting.
pub fn net2deeper(weights: ArrayView2<'_, f32>) -> (Array2<f32>, Array1<f32>) {
    let units = weights.ncols();
    (Array2::eye(units), Array1::zeros(units))
}
