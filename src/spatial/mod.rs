//! Spatial data structures for grid puzzles
//!
//! This module contains spatial-related functionality including:
//! - Lattice addressing for nodes, edges and cells
//! - Puzzle state over a grid and its invariants

/// Grid dimensions and coordinate domains
pub mod grid;
/// Puzzle state and element annotations
pub mod puzzle;

pub use grid::{CellPos, EdgePos, Grid, NodePos, Orientation};
pub use puzzle::{Cell, CellColor, CellKind, Census, EdgeType, NodeType, Puzzle};
