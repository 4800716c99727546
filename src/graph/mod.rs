//! Phase 1: The Surveyor
//!
//! Turns the configured location list and distance table into an
//! integer-indexed distance matrix, failing fast on malformed input.

mod matrix;

pub use matrix::{Cost, DistanceMatrix, GraphError};
