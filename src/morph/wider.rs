//! Widening transform: grow a layer's unit count without changing the
//! function the network computes.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;

use crate::error::MorphError;

/// Widen a layer by `added_size` units, preserving the composite function.
///
/// `weights`/`bias` belong to the layer being widened; `weights_next` is the
/// weight matrix of the layer consuming its output. For each new unit a
/// source unit is drawn uniformly at random (repeats allowed) and its column
/// and bias entry are duplicated. Every outgoing row of a replicated unit,
/// including the original row, is rescaled by `1 / replication_count`, so the
/// summed contribution into the next layer is unchanged.
///
/// Returns owned `(new_weights, new_bias, new_weights_next)` with shapes
/// `(S, D + added_size)`, `(D + added_size,)`, `(D + added_size, D_next)`.
/// `added_size == 0` returns copies of the inputs, never aliases.
///
/// # Arguments
///
/// * `weights` - Weight matrix of the widened layer, shape `(S, D)`
/// * `bias` - Bias of the widened layer, length `D`
/// * `weights_next` - Weight matrix of the next layer, shape `(D, D_next)`
/// * `added_size` - Number of units to add
/// * `rng` - Random source for picking duplicated units; seed it for
///   reproducible results
///
/// # Errors
///
/// Returns [`MorphError::ShapeMismatch`] if `bias` or `weights_next` disagree
/// with `weights` on the unit count `D`, and [`MorphError::InvalidArgument`]
/// when asked to widen a layer with no units to duplicate.
pub fn net2wider<R: Rng>(
    weights: ArrayView2<'_, f32>,
    bias: ArrayView1<'_, f32>,
    weights_next: ArrayView2<'_, f32>,
    added_size: usize,
    rng: &mut R,
) -> Result<(Array2<f32>, Array1<f32>, Array2<f32>), MorphError> {
    let units = weights.ncols();

    if bias.len() != units {
        return Err(MorphError::ShapeMismatch {
            context: "bias length",
            expected: units,
            got: bias.len(),
        });
    }
    if weights_next.nrows() != units {
        return Err(MorphError::ShapeMismatch {
            context: "next-layer input dimension",
            expected: units,
            got: weights_next.nrows(),
        });
    }
    if units == 0 && added_size > 0 {
        return Err(MorphError::InvalidArgument(
            "cannot widen a layer with no units".into(),
        ));
    }

    // Source unit for each duplicate; repeats are allowed and handled by the
    // replication counts below.
    let sources: Vec<usize> = (0..added_size).map(|_| rng.gen_range(0..units)).collect();

    // counts[j] = 1 original + number of duplicates drawn from unit j.
    let mut counts = vec![1usize; units];
    for &src in &sources {
        counts[src] += 1;
    }

    let mut new_weights = Array2::zeros((weights.nrows(), units + added_size));
    new_weights
        .slice_mut(ndarray::s![.., ..units])
        .assign(&weights);

    let mut new_bias = Array1::zeros(units + added_size);
    new_bias.slice_mut(ndarray::s![..units]).assign(&bias);

    for (offset, &src) in sources.iter().enumerate() {
        new_weights
            .column_mut(units + offset)
            .assign(&weights.column(src));
        new_bias[units + offset] = bias[src];
    }

    // Outgoing rows: original rows rescaled where replicated, then one
    // rescaled copy of the source row per duplicate.
    let mut new_weights_next = Array2::zeros((units + added_size, weights_next.ncols()));
    for (j, row) in weights_next.axis_iter(Axis(0)).enumerate() {
        let scale = 1.0 / counts[j] as f32;
        let mut target = new_weights_next.row_mut(j);
        target.assign(&row);
        target.mapv_inplace(|v| v * scale);
    }
    for (offset, &src) in sources.iter().enumerate() {
        let scale = 1.0 / counts[src] as f32;
        let mut target = new_weights_next.row_mut(units + offset);
        target.assign(&weights_next.row(src));
        target.mapv_inplace(|v| v * scale);
    }

    Ok((new_weights, new_bias, new_weights_next))
}
