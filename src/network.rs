//! Feed-forward network: an ordered collection of dense layers plus the
//! morphing operations that restructure it.

use std::fmt;

use ndarray::{Array2, ArrayView2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::activation::Activation;
use crate::error::MorphError;
use crate::layer::DenseLayer;
use crate::morph::{net2deeper, net2wider};

/// A feed-forward network of rectified-linear dense layers.
///
/// Owns the layer sequence and a seeded random source, and exposes the two
/// structural operations, [`wider`](Self::wider) and [`deeper`](Self::deeper),
/// that rewrite layers while preserving the function the network computes.
///
/// Invariant: for every adjacent pair, `layer[i].out_units() ==
/// layer[i+1].in_units()`. Construction establishes it and every morph
/// preserves it; layers are replaced or inserted wholesale, never resized in
/// place and never deleted.
///
/// Mutating operations are transactional: on any error the network is exactly
/// as it was before the call.
///
/// # Example
///
/// ```
/// use netmorph::Network;
///
/// let mut net = Network::new(4, &[3, 2], 42).unwrap();
/// net.wider(2, None).unwrap();
/// net.deeper(None).unwrap();
/// assert_eq!(net.n_layers(), 3);
/// ```
pub struct Network {
    layers: Vec<DenseLayer>,
    rng: Xoshiro256PlusPlus,
}

impl Network {
    /// Create a network with randomly initialized layers.
    ///
    /// # Arguments
    ///
    /// * `input_dim` - Width of the input batch (>= 1)
    /// * `hidden_dims` - Unit count per layer, in order (non-empty, all >= 1)
    /// * `seed` - Seed for layer initialization and unit duplication
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidArgument`] for a zero input dimension, an
    /// empty layer list, or a zero unit count.
    pub fn new(input_dim: usize, hidden_dims: &[usize], seed: u64) -> Result<Self, MorphError> {
        if input_dim == 0 {
            return Err(MorphError::InvalidArgument(
                "input dimension must be positive".into(),
            ));
        }
        if hidden_dims.is_empty() {
            return Err(MorphError::InvalidArgument(
                "at least one layer size is required".into(),
            ));
        }
        if let Some(i) = hidden_dims.iter().position(|&d| d == 0) {
            return Err(MorphError::InvalidArgument(format!(
                "layer sizes must be positive, got 0 at position {i}"
            )));
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut layers = Vec::with_capacity(hidden_dims.len());
        let mut in_units = input_dim;
        for &out_units in hidden_dims {
            layers.push(DenseLayer::random(
                in_units,
                out_units,
                Activation::Relu,
                &mut rng,
            ));
            in_units = out_units;
        }

        Ok(Self { layers, rng })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of layers.
    #[inline]
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    /// Layer at `index`, if present.
    #[inline]
    pub fn layer(&self, index: usize) -> Option<&DenseLayer> {
        self.layers.get(index)
    }

    /// All layers, in order.
    #[inline]
    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Width of the input batch this network accepts.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.layers[0].in_units()
    }

    /// Width of the output batch this network produces.
    #[inline]
    pub fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].out_units()
    }

    /// Mutable access to a layer (for test fixtures).
    #[inline]
    pub(crate) fn layer_mut(&mut self, index: usize) -> &mut DenseLayer {
        &mut self.layers[index]
    }

    // =========================================================================
    // Morphing operations
    // =========================================================================

    /// Widen `layer[pos]` by `added_size` units, preserving the network
    /// function.
    ///
    /// Both `layer[pos]` and `layer[pos + 1]` are replaced: the widened layer
    /// gains duplicated units, the next layer gains the matching rescaled
    /// input rows. The next layer's bias is unchanged. Collection length is
    /// unchanged.
    ///
    /// # Arguments
    ///
    /// * `added_size` - Units to add; `0` is a no-op that still replaces both
    ///   layers with fresh copies
    /// * `pos_layer` - Layer to widen; defaults to the second-to-last layer
    ///
    /// # Errors
    ///
    /// * [`MorphError::InvalidState`] with fewer than two layers
    /// * [`MorphError::InvalidArgument`] when `pos_layer >= n_layers - 1`
    /// * [`MorphError::ShapeMismatch`] if the stored layers already violate
    ///   the wiring invariant (upstream corruption)
    pub fn wider(&mut self, added_size: usize, pos_layer: Option<usize>) -> Result<(), MorphError> {
        let len = self.layers.len();
        if len < 2 {
            return Err(MorphError::InvalidState(format!(
                "need at least two layers to widen, got {len}"
            )));
        }

        let pos = match pos_layer {
            None => len - 2,
            Some(p) if p >= len - 1 => {
                return Err(MorphError::InvalidArgument(format!(
                    "pos_layer {p} out of range for widening (valid range 0..{})",
                    len - 1
                )))
            }
            Some(p) => p,
        };

        let layer = &self.layers[pos];
        let next = &self.layers[pos + 1];
        if layer.out_units() != next.in_units() {
            return Err(MorphError::ShapeMismatch {
                context: "wiring between adjacent layers",
                expected: layer.out_units(),
                got: next.in_units(),
            });
        }

        let (new_weights, new_bias, new_weights_next) = net2wider(
            layer.weights(),
            layer.bias(),
            next.weights(),
            added_size,
            &mut self.rng,
        )?;

        // Build both replacements before touching the sequence.
        let widened = DenseLayer::from_parts(new_weights, new_bias, layer.activation())?;
        let rewired =
            DenseLayer::from_parts(new_weights_next, next.bias().to_owned(), next.activation())?;

        self.layers[pos] = widened;
        self.layers[pos + 1] = rewired;
        Ok(())
    }

    /// Insert an identity-initialized layer after `layer[pos]`, preserving
    /// the network function.
    ///
    /// Collection length grows by one; indices after `pos` shift by one.
    ///
    /// # Arguments
    ///
    /// * `pos_layer` - Source layer; `None` means "append after the last
    ///   layer". An explicit position must satisfy `pos < n_layers - 1`,
    ///   the same bound `wider` uses; the append-after-last case is only
    ///   reachable through the default.
    ///
    /// # Errors
    ///
    /// * [`MorphError::InvalidArgument`] when an explicit
    ///   `pos_layer >= n_layers - 1`
    /// * [`MorphError::UnsupportedActivation`] if the source layer's
    ///   activation is not idempotent on non-negative inputs (the identity
    ///   layer would distort the signal)
    pub fn deeper(&mut self, pos_layer: Option<usize>) -> Result<(), MorphError> {
        let len = self.layers.len();
        let pos = match pos_layer {
            None => len - 1,
            Some(p) if p >= len - 1 => {
                return Err(MorphError::InvalidArgument(format!(
                    "pos_layer {p} out of range for deepening (valid range 0..{})",
                    len - 1
                )))
            }
            Some(p) => p,
        };

        let layer = &self.layers[pos];
        if !layer.activation().is_idempotent_on_nonnegative() {
            return Err(MorphError::UnsupportedActivation(layer.activation()));
        }

        let (weights, bias) = net2deeper(layer.weights());
        let identity = DenseLayer::from_parts(weights, bias, layer.activation())?;

        self.layers.insert(pos + 1, identity);
        Ok(())
    }

    // =========================================================================
    // Forward pass
    // =========================================================================

    /// Run a batch through all layers in order.
    ///
    /// # Arguments
    ///
    /// * `input` - Batch with shape `[n_rows, input_dim]`
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::ShapeMismatch`] when the batch width does not
    /// match [`input_dim`](Self::input_dim).
    pub fn forward(&self, input: ArrayView2<'_, f32>) -> Result<Array2<f32>, MorphError> {
        self.check_input_width(input)?;

        let mut z = self.layers[0].forward(input);
        for layer in &self.layers[1..] {
            z = layer.forward(z.view());
        }
        Ok(z)
    }

    /// Run a batch through all layers, rows in parallel.
    ///
    /// Same contract as [`forward`](Self::forward); worthwhile for large
    /// batches.
    pub fn par_forward(&self, input: ArrayView2<'_, f32>) -> Result<Array2<f32>, MorphError> {
        self.check_input_width(input)?;

        let n_rows = input.nrows();
        let out_dim = self.output_dim();

        let flat: Vec<f32> = (0..n_rows)
            .into_par_iter()
            .flat_map(|row| {
                let mut z = self.layers[0].forward_one(input.row(row));
                for layer in &self.layers[1..] {
                    z = layer.forward_one(z.view());
                }
                z.to_vec()
            })
            .collect();

        Ok(Array2::from_shape_vec((n_rows, out_dim), flat)
            .expect("row outputs have uniform length"))
    }

    fn check_input_width(&self, input: ArrayView2<'_, f32>) -> Result<(), MorphError> {
        if input.ncols() != self.input_dim() {
            return Err(MorphError::ShapeMismatch {
                context: "input batch width",
                expected: self.input_dim(),
                got: input.ncols(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Human-readable description: layer count and per-layer shapes,
    /// optionally the weight and bias values.
    pub fn summary(&self, show_weights: bool) -> String {
        let mut out = format!("Network: {} layers\n", self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            out.push_str(&format!(
                "  layer {i}: {} x {} ({})\n",
                layer.in_units(),
                layer.out_units(),
                layer.activation(),
            ));
            if show_weights {
                out.push_str(&format!(
                    "    weights: {:?}\n    bias: {:?}\n",
                    layer.weights(),
                    layer.bias(),
                ));
            }
        }
        out
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("n_layers", &self.layers.len())
            .field(
                "shapes",
                &self
                    .layers
                    .iter()
                    .map(|l| (l.in_units(), l.out_units()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
