//! Wave function collapse tile pattern generation
//!
//! Every cell of a board starts as a superposition of all tile choices.
//! Repeated collapse steps pick the most constrained cell, force it to a
//! single tile, and re-check a bounded window of neighbors, rejecting any
//! board state in which a cell is left with no viable tile.

#![forbid(unsafe_code)]

/// Core collapse engine: candidate sets, tile rules, and the board
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;

pub use io::error::{GenerationError, Result};
