use std::time::Duration;

use crate::io::error::Result;
use crate::spatial::Puzzle;

/// Decides whether a puzzle has at least one valid solving path
///
/// Implementations treat START and EXIT as the path's ends, remove obstacle
/// edges from the graph, require every REQUIRED node and edge on the path,
/// and apply the cell symbols as region rules. Generation only acts on the
/// verdict.
pub trait SolvabilityOracle {
    /// Check one puzzle within `budget`
    ///
    /// An oracle that cannot decide within the budget should answer
    /// `Ok(false)` so the caller moves on to a fresh attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle itself fails to run
    fn is_solvable(&mut self, puzzle: &Puzzle, budget: Duration) -> Result<bool>;
}

impl<F> SolvabilityOracle for F
where
    F: FnMut(&Puzzle) -> bool,
{
    fn is_solvable(&mut self, puzzle: &Puzzle, _budget: Duration) -> Result<bool> {
        Ok(self(puzzle))
    }
}

/// Oracle that accepts every puzzle
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SolvabilityOracle for AcceptAll {
    fn is_solvable(&mut self, _puzzle: &Puzzle, _budget: Duration) -> Result<bool> {
        Ok(true)
    }
}
