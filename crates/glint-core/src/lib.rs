//! Glint Core
//!
//! This crate contains the foundation types shared by the Glint UI core:
//! math, geometry, color, optimized collections, input samples, and logging.

pub mod alloc;
pub mod color;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod math;
