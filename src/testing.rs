//! Reusable fixtures for tests and demos.

use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::network::Network;

/// Overwrite every layer with a deterministic ramp pattern:
/// `w[[u, v]] = u * out_units + v`, `b[v] = v`.
///
/// Random initialization makes morph results hard to inspect by eye; the ramp
/// makes duplicated columns and rescaled rows recognizable at a glance.
pub fn fill_ramp(network: &mut Network) {
    for i in 0..network.n_layers() {
        let layer = network.layer_mut(i);

        let weights = layer.weights_mut();
        let cols = weights.ncols();
        for ((u, v), value) in weights.indexed_iter_mut() {
            *value = (u * cols + v) as f32;
        }

        for (v, value) in layer.bias_mut().iter_mut().enumerate() {
            *value = v as f32;
        }
    }
}

/// Seeded uniform `[0, 1)` batch of shape `[n_rows, n_cols]`.
pub fn random_batch(n_rows: usize, n_cols: usize, seed: u64) -> Array2<f32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    Array2::random_using((n_rows, n_cols), Uniform::new(0.0, 1.0), &mut rng)
}
