//! Dense layer data structure.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::Rng;

use crate::activation::Activation;
use crate::error::MorphError;

/// A fully-connected layer (weights + bias + activation).
///
/// Weights are stored as an `Array2<f32>` with shape `[in_units, out_units]`,
/// bias as an `Array1<f32>` of length `out_units`:
///
/// ```text
/// weights[[input, unit]] → coefficient
/// bias[unit]             → offset
/// ```
///
/// This layout makes the batch forward pass a single dot product:
/// `output = activation(input · weights + bias)`.
///
/// A layer's shape is fixed at construction. Morphing operations never resize
/// a layer in place; they build a replacement and swap it into the network.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use netmorph::{Activation, DenseLayer};
///
/// let layer = DenseLayer::from_parts(
///     array![[1.0, 0.0], [0.0, 1.0]],
///     array![0.5, -0.5],
///     Activation::Relu,
/// )
/// .unwrap();
///
/// let out = layer.forward(array![[1.0, 2.0]].view());
/// assert_eq!(out, array![[1.5, 1.5]]);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    /// Weight matrix: shape `[in_units, out_units]`.
    weights: Array2<f32>,
    /// Bias vector: length `out_units`.
    bias: Array1<f32>,
    /// Activation applied after the affine map.
    activation: Activation,
}

impl DenseLayer {
    /// Create a layer from explicit weights and bias.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::ShapeMismatch`] if `bias.len()` does not equal
    /// `weights.ncols()`.
    pub fn from_parts(
        weights: Array2<f32>,
        bias: Array1<f32>,
        activation: Activation,
    ) -> Result<Self, MorphError> {
        if bias.len() != weights.ncols() {
            return Err(MorphError::ShapeMismatch {
                context: "bias length",
                expected: weights.ncols(),
                got: bias.len(),
            });
        }

        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    /// Create a randomly initialized layer.
    ///
    /// Weights and bias are drawn from `N(0, sqrt(2 / in_units))`, the usual
    /// scaling for rectified-linear layers.
    ///
    /// # Arguments
    ///
    /// * `in_units` - Input dimension (must be >= 1)
    /// * `out_units` - Output dimension (must be >= 1)
    /// * `activation` - Activation applied after the affine map
    /// * `rng` - Seedable random source supplied by the caller
    pub fn random<R: Rng>(
        in_units: usize,
        out_units: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let std = (2.0 / in_units as f32).sqrt();
        let dist = Normal::new(0.0, std).expect("std dev is finite and positive");

        Self {
            weights: Array2::random_using((in_units, out_units), dist, rng),
            bias: Array1::random_using(out_units, dist, rng),
            activation,
        }
    }

    /// Input dimension.
    #[inline]
    pub fn in_units(&self) -> usize {
        self.weights.nrows()
    }

    /// Output dimension (unit count).
    #[inline]
    pub fn out_units(&self) -> usize {
        self.weights.ncols()
    }

    /// Weight matrix view: shape `[in_units, out_units]`.
    #[inline]
    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    /// Bias view: length `out_units`.
    #[inline]
    pub fn bias(&self) -> ArrayView1<'_, f32> {
        self.bias.view()
    }

    /// Mutable access to the weight matrix (for test fixtures).
    #[inline]
    pub fn weights_mut(&mut self) -> &mut Array2<f32> {
        &mut self.weights
    }

    /// Mutable access to the bias (for test fixtures).
    #[inline]
    pub fn bias_mut(&mut self) -> &mut Array1<f32> {
        &mut self.bias
    }

    /// Activation applied by this layer.
    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Forward a batch: shape `[n_rows, in_units]` → `[n_rows, out_units]`.
    pub fn forward(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        let mut out = x.dot(&self.weights) + &self.bias;
        self.activation.apply(&mut out);
        out
    }

    /// Forward a single row: length `in_units` → length `out_units`.
    ///
    /// Row kernel shared by the sequential and parallel batch paths.
    pub fn forward_one(&self, x: ArrayView1<'_, f32>) -> Array1<f32> {
        let mut out = x.dot(&self.weights) + &self.bias;
        out.mapv_inplace(|v| self.activation.apply_scalar(v));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn from_parts_valid() {
        let layer = DenseLayer::from_parts(
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            array![0.1, 0.2, 0.3],
            Activation::Relu,
        )
        .unwrap();

        assert_eq!(layer.in_units(), 2);
        assert_eq!(layer.out_units(), 3);
        assert_eq!(layer.bias()[1], 0.2);
    }

    #[test]
    fn from_parts_rejects_bias_mismatch() {
        let result = DenseLayer::from_parts(
            array![[1.0, 2.0], [3.0, 4.0]],
            array![0.1],
            Activation::Relu,
        );

        assert!(matches!(
            result,
            Err(MorphError::ShapeMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn random_has_requested_shape() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let layer = DenseLayer::random(4, 3, Activation::Relu, &mut rng);

        assert_eq!(layer.in_units(), 4);
        assert_eq!(layer.out_units(), 3);
        assert_eq!(layer.bias().len(), 3);
    }

    #[test]
    fn random_is_reproducible() {
        let mut rng_a = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut rng_b = Xoshiro256PlusPlus::seed_from_u64(42);

        let a = DenseLayer::random(3, 2, Activation::Relu, &mut rng_a);
        let b = DenseLayer::random(3, 2, Activation::Relu, &mut rng_b);

        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.bias(), b.bias());
    }

    #[test]
    fn forward_applies_affine_then_relu() {
        let layer = DenseLayer::from_parts(
            array![[1.0, -1.0], [0.0, 1.0]],
            array![0.0, -3.0],
            Activation::Relu,
        )
        .unwrap();

        // row: [2, 1] → pre-activation [2*1+1*0, 2*(-1)+1*1-3] = [2, -4] → [2, 0]
        let out = layer.forward(array![[2.0, 1.0]].view());
        assert_eq!(out, array![[2.0, 0.0]]);
    }

    #[test]
    fn forward_one_matches_batch() {
        use approx::assert_abs_diff_eq;

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let layer = DenseLayer::random(4, 3, Activation::Relu, &mut rng);

        let batch = array![[0.5, -0.25, 1.0, 2.0]];
        let from_batch = layer.forward(batch.view());
        let from_row = layer.forward_one(batch.row(0));

        for (a, b) in from_batch.row(0).iter().zip(from_row.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }
}
