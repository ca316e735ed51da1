//! Input/output surfaces around the generation core
//!
//! Errors and constants shared by every layer, the portable puzzle encoding,
//! the external solver adapter, and the command-line front end.

/// Command-line argument parsing and the generation runner
pub mod cli;
/// Solvability oracle backed by an external process
pub mod command;
/// Constants and defaults
pub mod configuration;
/// JSON encoding of puzzles
pub mod encoding;
/// Error types
pub mod error;
/// Terminal progress display
pub mod progress;
