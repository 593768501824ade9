//! Fast mathematical operations using the `glam` crate.
//!
//! This module re-exports all types and functions from [`glam`], which provides
//! vector mathematics using SIMD instructions when available. The UI core only
//! needs 2D types in practice:
//!
//! - [`Vec2`]: positions, sizes, pointer deltas
//!
//! # Examples
//!
//! ```
//! use glint_core::math::Vec2;
//!
//! let position = Vec2::new(10.0, 20.0);
//! let delta = Vec2::new(1.0, 0.5);
//! let moved = position + delta;
//! assert_eq!(moved, Vec2::new(11.0, 20.5));
//! ```
//!
//! [`glam`]: https://docs.rs/glam
pub use glam::*;
