//! Constrained random generation of grid path puzzles
//!
//! A puzzle lives on a lattice of nodes joined by horizontal and vertical
//! edges, with cells in between. Requests name exact counts of obstacles,
//! required elements and cell symbols; they are checked against closed-form
//! feasibility bounds, realized by staged rejection sampling, and retried
//! until a solvability oracle accepts the result or the budget runs out.

#![forbid(unsafe_code)]

/// Validation, staged construction and the generation retry loop
pub mod algorithm;
/// Encoding, external oracles, command-line interface and error handling
pub mod io;
/// Grid addressing and puzzle state
pub mod spatial;

pub use io::error::{GenerationError, Result};
