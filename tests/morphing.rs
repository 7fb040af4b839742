//! Structural tests for network morphing.
//!
//! These tests verify that:
//! 1. `wider` / `deeper` produce the documented shapes and lengths
//! 2. The wiring invariant survives arbitrary morph sequences
//! 3. Bounds violations fail with the right error and leave state untouched

use netmorph::{testing, MorphError, Network};
use rstest::rstest;

// =============================================================================
// Test Helpers
// =============================================================================

fn shapes(net: &Network) -> Vec<(usize, usize)> {
    net.layers()
        .iter()
        .map(|l| (l.in_units(), l.out_units()))
        .collect()
}

fn assert_wiring_holds(net: &Network) {
    for (i, pair) in net.layers().windows(2).enumerate() {
        assert_eq!(
            pair[0].out_units(),
            pair[1].in_units(),
            "wiring broken between layers {} and {}",
            i,
            i + 1
        );
    }
}

// =============================================================================
// Reference Scenario
// =============================================================================

#[test]
fn widen_then_deepen_scenario() {
    // 4 inputs, dims [3, 2]: layer0 is 4x3, layer1 is 3x2.
    let mut net = Network::new(4, &[3, 2], 42).unwrap();
    assert_eq!(shapes(&net), vec![(4, 3), (3, 2)]);

    // Widen the second-to-last layer (index 0) by 2 units.
    net.wider(2, None).unwrap();
    assert_eq!(shapes(&net), vec![(4, 5), (5, 2)]);
    assert_eq!(net.n_layers(), 2);

    // Deepen with the default: a 2x2 identity layer appended at the end.
    net.deeper(None).unwrap();
    assert_eq!(shapes(&net), vec![(4, 5), (5, 2), (2, 2)]);
    assert_eq!(net.n_layers(), 3);

    assert_wiring_holds(&net);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn wider_never_changes_length() {
    let mut net = Network::new(6, &[5, 4, 3], 1).unwrap();

    for pos in [None, Some(0), Some(1)] {
        net.wider(1, pos).unwrap();
        assert_eq!(net.n_layers(), 3);
        assert_wiring_holds(&net);
    }
}

#[test]
fn deeper_grows_length_by_one_at_pos_plus_one() {
    let mut net = Network::new(6, &[5, 4, 3], 1).unwrap();

    net.deeper(Some(0)).unwrap();
    assert_eq!(net.n_layers(), 4);
    // inserted at index 1, sized to layer 0's output
    assert_eq!(shapes(&net)[1], (5, 5));

    net.deeper(None).unwrap();
    assert_eq!(net.n_layers(), 5);
    assert_eq!(shapes(&net)[4], (3, 3));

    assert_wiring_holds(&net);
}

#[test]
fn wiring_survives_interleaved_morphs() {
    let mut net = Network::new(8, &[6, 5, 4], 3).unwrap();

    net.wider(2, Some(0)).unwrap();
    net.deeper(Some(1)).unwrap();
    net.wider(1, None).unwrap();
    net.deeper(None).unwrap();
    net.wider(3, Some(2)).unwrap();

    assert_wiring_holds(&net);
    assert_eq!(net.n_layers(), 5);
    // morphs never drop a layer
    assert!(net.layers().iter().all(|l| l.out_units() >= 1));
}

#[test]
fn widened_units_are_duplicates_under_ramp_weights() {
    let mut net = Network::new(4, &[3, 2], 42).unwrap();
    testing::fill_ramp(&mut net);

    net.wider(2, None).unwrap();

    // Appended columns of the widened layer are copies of ramp columns.
    let widened = net.layer(0).unwrap();
    for extra in 3..5 {
        let col = widened.weights().column(extra).to_owned();
        let found = (0..3).any(|j| {
            col == widened.weights().column(j)
                && widened.bias()[extra] == widened.bias()[j]
        });
        assert!(found, "column {extra} does not duplicate a source unit");
    }
}

// =============================================================================
// Bounds and Errors
// =============================================================================

#[rstest]
#[case(1)]
#[case(2)]
#[case(100)]
fn wider_rejects_positions_without_a_successor(#[case] pos: usize) {
    let mut net = Network::new(4, &[3, 2], 42).unwrap();
    let before = shapes(&net);

    let result = net.wider(1, Some(pos));
    assert!(matches!(result, Err(MorphError::InvalidArgument(_))));
    assert_eq!(shapes(&net), before, "failed call must not mutate");
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(100)]
fn deeper_rejects_explicit_positions_without_a_successor(#[case] pos: usize) {
    let mut net = Network::new(4, &[3, 2], 42).unwrap();
    let before = shapes(&net);

    let result = net.deeper(Some(pos));
    assert!(matches!(result, Err(MorphError::InvalidArgument(_))));
    assert_eq!(shapes(&net), before, "failed call must not mutate");
}

#[test]
fn wider_needs_two_layers() {
    let mut net = Network::new(4, &[3], 42).unwrap();

    let result = net.wider(1, None);
    assert!(matches!(result, Err(MorphError::InvalidState(_))));
    assert_eq!(shapes(&net), vec![(4, 3)]);
}

#[test]
fn deeper_default_works_on_a_single_layer() {
    // No explicit position is valid on a one-layer network, but the default
    // append-after-last mode is.
    let mut net = Network::new(4, &[3], 42).unwrap();

    net.deeper(None).unwrap();
    assert_eq!(shapes(&net), vec![(4, 3), (3, 3)]);
    assert_wiring_holds(&net);
}

#[test]
fn construction_rejects_degenerate_dimensions() {
    assert!(matches!(
        Network::new(0, &[3, 2], 1),
        Err(MorphError::InvalidArgument(_))
    ));
    assert!(matches!(
        Network::new(4, &[], 1),
        Err(MorphError::InvalidArgument(_))
    ));
    assert!(matches!(
        Network::new(4, &[3, 0], 1),
        Err(MorphError::InvalidArgument(_))
    ));
}

#[test]
fn forward_checks_batch_width_after_morphs() {
    let mut net = Network::new(4, &[3, 2], 42).unwrap();
    net.wider(2, None).unwrap();

    // Input width is defined by layer 0, which widening does not touch.
    let too_narrow = testing::random_batch(2, 3, 1);
    assert!(matches!(
        net.forward(too_narrow.view()),
        Err(MorphError::ShapeMismatch { expected: 4, got: 3, .. })
    ));

    let ok = testing::random_batch(2, 4, 1);
    assert_eq!(net.forward(ok.view()).unwrap().dim(), (2, 2));
}
