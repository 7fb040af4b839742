//! netmorph: function-preserving network morphisms for Rust.
//!
//! Grow a dense feed-forward network (wider layers, deeper stacks) without
//! changing the function it computes at the moment of the change. The two
//! transforms let a larger network pick up exactly where a smaller one left
//! off.
//!
//! # Key Types
//!
//! - [`Network`] - Ordered dense layers with `wider` / `deeper` operations
//! - [`DenseLayer`] - One weight matrix, bias vector, and activation
//! - [`morph::net2wider`] / [`morph::net2deeper`] - The pure transforms
//! - [`MorphError`] - Everything that can go wrong
//!
//! # Example
//!
//! ```
//! use netmorph::{testing, Network};
//!
//! let mut net = Network::new(4, &[3, 2], 42).unwrap();
//! let batch = testing::random_batch(2, 4, 7);
//! let before = net.forward(batch.view()).unwrap();
//!
//! net.wider(2, None).unwrap();
//! net.deeper(None).unwrap();
//!
//! let after = net.forward(batch.view()).unwrap();
//! for (a, b) in after.iter().zip(before.iter()) {
//!     assert!((a - b).abs() < 1e-4);
//! }
//! ```

pub mod activation;
pub mod error;
pub mod layer;
pub mod morph;
pub mod network;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use activation::Activation;
pub use error::MorphError;
pub use layer::DenseLayer;
pub use network::Network;
