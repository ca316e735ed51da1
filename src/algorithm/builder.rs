//! Randomized, count-exact puzzle construction
//!
//! Elements are placed in six stages with rejection sampling: draw a random
//! slot, keep it if the stage's precondition holds, and repeat until the
//! stage's count reaches zero. Stages never overwrite an element specialized
//! earlier and never backtrack. Each stage has a bounded number of draws so a
//! saturated board is reported as a stall instead of looping forever.

use std::fmt;

use log::debug;
use rand::Rng;

use crate::algorithm::request::GenerationRequest;
use crate::io::configuration::{ATTEMPTS_PER_SLOT, MIN_STAGE_ATTEMPTS};
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::{Cell, CellColor, CellPos, EdgePos, EdgeType, Grid, NodePos, NodeType, Puzzle};

/// Build stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Remove edges from the graph
    Obstacles,
    /// Mark nodes and edges the path must use
    Required,
    /// One square per requested color
    ColorCoverage,
    /// Remaining squares in random colors
    Squares,
    /// Suns
    Suns,
    /// Cancellations
    Cancellations,
}

impl Stage {
    /// Human-readable stage name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Obstacles => "obstacles",
            Self::Required => "required",
            Self::ColorCoverage => "color coverage",
            Self::Squares => "squares",
            Self::Suns => "suns",
            Self::Cancellations => "cancellations",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds puzzles from validated requests using a single owned random source
pub struct PuzzleBuilder<R> {
    rng: R,
    attempts_per_slot: usize,
    min_stage_attempts: usize,
}

impl<R: Rng> PuzzleBuilder<R> {
    /// Create a builder with the default attempt budget
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            attempts_per_slot: ATTEMPTS_PER_SLOT,
            min_stage_attempts: MIN_STAGE_ATTEMPTS,
        }
    }

    /// Override the attempt budget
    ///
    /// A stage sampling from `n` slots may draw
    /// `max(min_stage_attempts, attempts_per_slot * n)` times.
    #[must_use]
    pub fn with_attempt_budget(
        mut self,
        attempts_per_slot: usize,
        min_stage_attempts: usize,
    ) -> Self {
        self.attempts_per_slot = attempts_per_slot;
        self.min_stage_attempts = min_stage_attempts;
        self
    }

    /// Give back the random source
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Draws allowed for a stage sampling from `slots` slots
    pub fn stage_budget(&self, slots: usize) -> usize {
        self.attempts_per_slot
            .saturating_mul(slots)
            .max(self.min_stage_attempts)
    }

    /// Build a fresh puzzle holding exactly the requested counts
    ///
    /// The request is assumed to have passed validation; it is not checked
    /// again here.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are out of range, or
    /// [`GenerationError::Stall`] if a stage exhausts its draws
    pub fn build(&mut self, request: &GenerationRequest) -> Result<Puzzle> {
        let grid = request.grid()?;
        let mut puzzle = Puzzle::new(grid);
        let palette = CellColor::square_palette(request.colors);

        self.place_obstacles(&mut puzzle, request.obstacles)?;
        self.place_required(&mut puzzle, request.required)?;
        let covered = self.cover_colors(&mut puzzle, request.squares, &palette)?;
        self.place_squares(&mut puzzle, request.squares - covered, &palette)?;
        self.place_symbols(&mut puzzle, Stage::Suns, request.suns, Cell::sun())?;
        self.place_symbols(
            &mut puzzle,
            Stage::Cancellations,
            request.cancellations,
            Cell::cancellation(),
        )?;

        Ok(puzzle)
    }

    fn place_obstacles(&mut self, puzzle: &mut Puzzle, count: usize) -> Result<()> {
        let grid = puzzle.grid();
        let budget = self.stage_budget(grid.edge_count());
        run_stage(&mut self.rng, Stage::Obstacles, count, budget, |rng| {
            let pos = random_edge(rng, grid);
            puzzle.edge(pos) == Some(EdgeType::Normal)
                && puzzle.set_edge(pos, EdgeType::Obstacle).is_ok()
        })
    }

    fn place_required(&mut self, puzzle: &mut Puzzle, count: usize) -> Result<()> {
        let grid = puzzle.grid();
        let budget = self.stage_budget(grid.edge_count() + grid.node_count());
        run_stage(&mut self.rng, Stage::Required, count, budget, |rng| {
            // Each family is equally likely regardless of how many free slots it has left
            match rng.random_range(0..3) {
                0 => {
                    let (cols, rows) = grid.horizontal_edge_dim();
                    let pos = EdgePos::horizontal(rng.random_range(0..cols), rng.random_range(0..rows));
                    mark_required_edge(puzzle, pos)
                }
                1 => {
                    let (cols, rows) = grid.vertical_edge_dim();
                    let pos = EdgePos::vertical(rng.random_range(0..cols), rng.random_range(0..rows));
                    mark_required_edge(puzzle, pos)
                }
                _ => {
                    let (cols, rows) = grid.node_dim();
                    let pos = NodePos::new(rng.random_range(0..cols), rng.random_range(0..rows));
                    puzzle.node(pos) == Some(NodeType::Normal)
                        && puzzle.set_node(pos, NodeType::Required).is_ok()
                }
            }
        })
    }

    /// Place one square of each palette color, lowest first; returns how many were placed
    fn cover_colors(
        &mut self,
        puzzle: &mut Puzzle,
        squares: usize,
        palette: &[CellColor],
    ) -> Result<usize> {
        let coverage: Vec<CellColor> = palette.iter().copied().take(squares).collect();
        let grid = puzzle.grid();
        let budget = self.stage_budget(grid.cell_count());
        let mut next = 0;
        run_stage(
            &mut self.rng,
            Stage::ColorCoverage,
            coverage.len(),
            budget,
            |rng| {
                let Some(&color) = coverage.get(next) else {
                    return false;
                };
                let placed = place_in_empty_cell(puzzle, random_cell(rng, grid), Cell::square(color));
                if placed {
                    next += 1;
                }
                placed
            },
        )?;
        Ok(coverage.len())
    }

    fn place_squares(
        &mut self,
        puzzle: &mut Puzzle,
        count: usize,
        palette: &[CellColor],
    ) -> Result<()> {
        if count > 0 && palette.is_empty() {
            return Err(invalid_parameter(
                "colors",
                &0,
                &"squares need at least one square color",
            ));
        }
        let grid = puzzle.grid();
        let budget = self.stage_budget(grid.cell_count());
        run_stage(&mut self.rng, Stage::Squares, count, budget, |rng| {
            let pos = random_cell(rng, grid);
            if puzzle.cell(pos).is_none_or(|cell| !cell.is_empty()) {
                return false;
            }
            // Colors repeat freely here; coverage was settled by the previous stage
            let Some(&color) = palette.get(rng.random_range(0..palette.len())) else {
                return false;
            };
            place_in_empty_cell(puzzle, pos, Cell::square(color))
        })
    }

    fn place_symbols(
        &mut self,
        puzzle: &mut Puzzle,
        stage: Stage,
        count: usize,
        symbol: Cell,
    ) -> Result<()> {
        let grid = puzzle.grid();
        let budget = self.stage_budget(grid.cell_count());
        run_stage(&mut self.rng, stage, count, budget, |rng| {
            place_in_empty_cell(puzzle, random_cell(rng, grid), symbol)
        })
    }
}

/// Repeat `attempt` until it has succeeded `count` times or `budget` draws are spent
fn run_stage<R: Rng>(
    rng: &mut R,
    stage: Stage,
    count: usize,
    budget: usize,
    mut attempt: impl FnMut(&mut R) -> bool,
) -> Result<()> {
    let mut remaining = count;
    let mut draws = 0;

    while remaining > 0 {
        if draws >= budget {
            debug!("Stage {stage} stalled with {remaining} left after {draws} draws");
            return Err(GenerationError::Stall {
                stage,
                remaining,
                attempts: draws,
                attempt: None,
            });
        }
        draws += 1;
        if attempt(rng) {
            remaining -= 1;
        }
    }

    if count > 0 {
        debug!("Stage {stage}: placed {count} in {draws} draws");
    }
    Ok(())
}

/// Pick an orientation with even odds, then a uniform slot in its domain
fn random_edge<R: Rng>(rng: &mut R, grid: Grid) -> EdgePos {
    if rng.random_bool(0.5) {
        let (cols, rows) = grid.horizontal_edge_dim();
        EdgePos::horizontal(rng.random_range(0..cols), rng.random_range(0..rows))
    } else {
        let (cols, rows) = grid.vertical_edge_dim();
        EdgePos::vertical(rng.random_range(0..cols), rng.random_range(0..rows))
    }
}

fn random_cell<R: Rng>(rng: &mut R, grid: Grid) -> CellPos {
    let (cols, rows) = grid.cell_dim();
    CellPos::new(rng.random_range(0..cols), rng.random_range(0..rows))
}

fn mark_required_edge(puzzle: &mut Puzzle, pos: EdgePos) -> bool {
    puzzle.edge_exists(pos)
        && puzzle.edge(pos) == Some(EdgeType::Normal)
        && puzzle.set_edge(pos, EdgeType::Required).is_ok()
}

fn place_in_empty_cell(puzzle: &mut Puzzle, pos: CellPos, cell: Cell) -> bool {
    puzzle.cell(pos).is_some_and(|current| current.is_empty()) && puzzle.set_cell(pos, cell).is_ok()
}
