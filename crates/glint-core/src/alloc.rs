//! Optimized allocation and collection types for Glint.
//!
//! Re-exports the AHash hasher state backing the identity-keyed maps,
//! measurably faster than the default SipHash for the small keys the UI
//! core hashes every frame.

pub use ahash::RandomState;
