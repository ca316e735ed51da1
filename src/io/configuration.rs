//! Generation constants and runtime configuration defaults

use std::time::Duration;

// Grid size limits
/// Smallest grid dimension that still has cells
pub const MIN_GRID_DIMENSION: usize = 2;
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 64;

// Palette layout: 0 and 1 are reserved for the sun and cancellation symbols
/// Lowest color value a square may carry
pub const FIRST_SQUARE_COLOR: u8 = 2;
/// Highest color value in the palette
pub const MAX_COLOR_VALUE: u8 = 8;

// Default request, matching the preset offered on first launch
/// Default grid width
pub const DEFAULT_WIDTH: usize = 5;
/// Default grid height
pub const DEFAULT_HEIGHT: usize = 5;
/// Default number of obstacle edges
pub const DEFAULT_OBSTACLES: usize = 4;
/// Default number of required nodes and edges
pub const DEFAULT_REQUIRED: usize = 4;
/// Default number of squares
pub const DEFAULT_SQUARES: usize = 4;
/// Default number of suns
pub const DEFAULT_SUNS: usize = 4;
/// Default number of cancellations
pub const DEFAULT_CANCELLATIONS: usize = 4;
/// Default color count (square colors span `2..=DEFAULT_COLORS`)
pub const DEFAULT_COLORS: usize = 5;

// Rejection sampling budget per build stage
/// Random draws allowed per slot of the stage's sampling domain
pub const ATTEMPTS_PER_SLOT: usize = 256;
/// Floor on the random draws allowed for any stage
pub const MIN_STAGE_ATTEMPTS: usize = 10_000;

// Session budgets
/// Wall-clock budget for a whole generation session
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(600);
/// Budget handed to a single solvability check
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(60);
/// Poll interval while waiting on an external oracle process
pub const ORACLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

// Progress display settings
/// Spinner redraw interval
pub const PROGRESS_TICK: Duration = Duration::from_millis(120);

/// Shown to the user when a session ends without an accepted puzzle
pub const FALLBACK_WARNING: &str = "The requested combination proved hard to realize. \
     Try generating again, lower some of the counts, or build the puzzle by hand.";
