//! Morphing walkthrough (not run in CI).
//!
//! Builds a small network, widens and deepens it, and shows that the output
//! on a random batch is unchanged:
//!
//! `cargo run --bin morph_demo`

use netmorph::{testing, Network};

fn main() {
    let mut net = Network::new(4, &[3, 2], 42).expect("valid dimensions");
    let batch = testing::random_batch(2, 4, 7);

    println!("{}", net.summary(false));
    let before = net.forward(batch.view()).expect("batch width matches");

    println!("##### ----> Modify");
    net.wider(2, None).expect("widening the second-to-last layer");
    net.deeper(None).expect("appending an identity layer");

    println!("{}", net.summary(false));
    let after = net.forward(batch.view()).expect("batch width matches");

    let max_diff = before
        .iter()
        .zip(after.iter())
        .map(|(b, a)| (b - a).abs())
        .fold(0.0f32, f32::max);
    println!("max output change across the morphs: {max_diff:.2e}");
}
