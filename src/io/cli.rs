//! Command-line interface for generating a single puzzle

use crate::algorithm::bounds::SelectorLimits;
use crate::algorithm::controller::{ControllerConfig, GenerationController, GenerationOutcome};
use crate::algorithm::oracle::{AcceptAll, SolvabilityOracle};
use crate::algorithm::request::GenerationRequest;
use crate::io::command::CommandOracle;
use crate::io::configuration::{
    DEFAULT_CANCELLATIONS, DEFAULT_COLORS, DEFAULT_GENERATION_TIMEOUT, DEFAULT_HEIGHT,
    DEFAULT_OBSTACLES, DEFAULT_ORACLE_TIMEOUT, DEFAULT_REQUIRED, DEFAULT_SQUARES, DEFAULT_SUNS,
    DEFAULT_WIDTH,
};
use crate::io::encoding::PuzzleEncoding;
use crate::io::error::{GenerationError, Result};
use crate::io::progress::GenerationProgress;
use crate::spatial::Grid;
use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "pathgrid")]
#[command(
    version,
    about = "Generate grid path puzzles with exact element counts"
)]
/// Command-line arguments for the puzzle generator
pub struct Cli {
    /// Grid width in nodes
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in nodes
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Obstacle edges
    #[arg(short, long, default_value_t = DEFAULT_OBSTACLES)]
    pub obstacles: usize,

    /// Required nodes and edges
    #[arg(short, long, default_value_t = DEFAULT_REQUIRED)]
    pub required: usize,

    /// Square cells
    #[arg(short = 'S', long, default_value_t = DEFAULT_SQUARES)]
    pub squares: usize,

    /// Sun cells
    #[arg(short = 'u', long, default_value_t = DEFAULT_SUNS)]
    pub suns: usize,

    /// Cancellation cells
    #[arg(short, long, default_value_t = DEFAULT_CANCELLATIONS)]
    pub cancellations: usize,

    /// Highest square color value (2 to 8)
    #[arg(short = 'C', long, default_value_t = DEFAULT_COLORS)]
    pub colors: usize,

    /// Random seed for reproducible generation; drawn at random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Session budget in seconds
    #[arg(short, long, default_value_t = DEFAULT_GENERATION_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Budget for a single solvability check in seconds
    #[arg(long, default_value_t = DEFAULT_ORACLE_TIMEOUT.as_secs())]
    pub oracle_timeout: u64,

    /// Stop after this many build attempts
    #[arg(short, long)]
    pub max_attempts: Option<usize>,

    /// External solver deciding solvability (reads the puzzle as JSON on stdin)
    #[arg(long, value_name = "PROGRAM")]
    pub oracle: Option<PathBuf>,

    /// Argument passed to the solver; repeat for several
    #[arg(long = "oracle-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub oracle_args: Vec<String>,

    /// Write the puzzle JSON here instead of stdout
    #[arg(short = 'O', long)]
    pub output: Option<PathBuf>,

    /// Print the largest useful counts for the grid and exit
    #[arg(short, long)]
    pub limits: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Request described by the arguments
    pub const fn request(&self) -> GenerationRequest {
        GenerationRequest {
            width: self.width,
            height: self.height,
            obstacles: self.obstacles,
            required: self.required,
            squares: self.squares,
            suns: self.suns,
            cancellations: self.cancellations,
            colors: self.colors,
        }
    }

    /// Session budgets described by the arguments
    pub const fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            timeout: Duration::from_secs(self.timeout),
            oracle_timeout: Duration::from_secs(self.oracle_timeout),
            max_attempts: self.max_attempts,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one generation session from parsed arguments
pub struct GenerationRunner {
    cli: Cli,
    progress: Option<GenerationProgress>,
}

impl GenerationRunner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = (cli.should_show_progress() && !cli.limits).then(GenerationProgress::new);
        Self { cli, progress }
    }

    /// Generate a puzzle, or print the grid's limits, writing results to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the request is invalid, the oracle fails, or the
    /// result cannot be written
    pub fn run(&mut self, out: &mut impl Write) -> Result<()> {
        if self.cli.limits {
            return self.write_limits(out);
        }

        let request = self.cli.request();
        let seed = self.cli.seed.unwrap_or_else(rand::random);
        info!("Generating {}x{} puzzle with seed {seed}", request.width, request.height);

        let outcome = match &self.cli.oracle {
            Some(program) => {
                let oracle = CommandOracle::new(program).args(&self.cli.oracle_args);
                self.generate_with(oracle, request, seed)?
            }
            None => {
                warn!("No oracle given; every candidate is accepted unchecked");
                self.generate_with(AcceptAll, request, seed)?
            }
        };

        if let Some(warning) = &outcome.warning {
            warn!("{warning}");
        }

        let json = PuzzleEncoding::from_puzzle(&outcome.puzzle)
            .with_request(&request)
            .to_json_pretty()?;

        match &self.cli.output {
            Some(path) => {
                std::fs::write(path, json).map_err(|source| GenerationError::FileSystem {
                    path: path.clone(),
                    operation: "write puzzle",
                    source,
                })?;
                writeln!(
                    out,
                    "{} puzzle written to {}",
                    if outcome.accepted { "Accepted" } else { "Fallback" },
                    path.display()
                )?;
            }
            None => writeln!(out, "{json}")?,
        }
        Ok(())
    }

    fn generate_with<O: SolvabilityOracle>(
        &self,
        oracle: O,
        request: GenerationRequest,
        seed: u64,
    ) -> Result<GenerationOutcome> {
        let mut controller =
            GenerationController::new(oracle).with_config(self.cli.controller_config());
        let session = controller.session(request, StdRng::seed_from_u64(seed));

        let outcome = match &self.progress {
            Some(progress) => {
                let outcome = session.run(|snapshot| progress.update(snapshot))?;
                progress.finish(&outcome);
                outcome
            }
            None => session.run(|_| {})?,
        };
        Ok(outcome)
    }

    fn write_limits(&self, out: &mut impl Write) -> Result<()> {
        let grid = Grid::new(self.cli.width, self.cli.height)?;
        let limits = SelectorLimits::for_grid(grid.width(), grid.height());
        writeln!(out, "Grid {grid}")?;
        writeln!(out, "  obstacles:     0..={}", limits.max_obstacles)?;
        writeln!(out, "  required:      0..={}", limits.max_required)?;
        writeln!(out, "  squares:       0..={}", limits.max_cells)?;
        writeln!(out, "  suns:          0..={}", limits.max_cells)?;
        writeln!(out, "  cancellations: 0..={}", limits.max_cells)?;
        writeln!(out, "  colors:        {}..={}", limits.min_colors, limits.max_colors)?;
        Ok(())
    }
}
