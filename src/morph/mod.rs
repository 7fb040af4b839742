//! Function-preserving transforms over layer weight tensors.
//!
//! The two algorithms are pure: they read weight/bias views, return freshly
//! owned tensors, and touch no other state. [`Network`](crate::Network)
//! applies them and manages layer replacement; they are public because the
//! tensors-in, tensors-out contract is useful on its own.
//!
//! - [`net2wider`]: duplicate randomly chosen units of a layer and rescale
//!   their outgoing weights so the composite function is unchanged.
//! - [`net2deeper`]: produce identity weights for a new layer that reproduces
//!   its input exactly.

mod deeper;
mod wider;

pub use deeper::net2deeper;
pub use wider::net2wider;
