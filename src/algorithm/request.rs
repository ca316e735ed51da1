//! Generation requests: grid size, element counts and their value ranges

use crate::io::configuration::{
    DEFAULT_CANCELLATIONS, DEFAULT_COLORS, DEFAULT_HEIGHT, DEFAULT_OBSTACLES, DEFAULT_REQUIRED,
    DEFAULT_SQUARES, DEFAULT_SUNS, DEFAULT_WIDTH, FIRST_SQUARE_COLOR, MAX_COLOR_VALUE,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Grid;

/// Requested grid size and element counts for one puzzle
///
/// `colors` is the highest square color value: squares are colored from
/// `2..=colors`, so `colors - 1` distinct square colors are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationRequest {
    /// Grid width in nodes
    pub width: usize,
    /// Grid height in nodes
    pub height: usize,
    /// Obstacle edges
    pub obstacles: usize,
    /// Required nodes and edges
    pub required: usize,
    /// Square cells
    pub squares: usize,
    /// Sun cells
    pub suns: usize,
    /// Cancellation cells
    pub cancellations: usize,
    /// Color count
    pub colors: usize,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            obstacles: DEFAULT_OBSTACLES,
            required: DEFAULT_REQUIRED,
            squares: DEFAULT_SQUARES,
            suns: DEFAULT_SUNS,
            cancellations: DEFAULT_CANCELLATIONS,
            colors: DEFAULT_COLORS,
        }
    }
}

impl GenerationRequest {
    /// Request an empty puzzle of the given size
    pub const fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            obstacles: 0,
            required: 0,
            squares: 0,
            suns: 0,
            cancellations: 0,
            colors: FIRST_SQUARE_COLOR as usize,
        }
    }

    /// Grid described by this request
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are out of range
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.width, self.height)
    }

    /// Check the input domain of every parameter
    ///
    /// This only covers value ranges. Feasibility of the counts on the grid is
    /// decided by [`crate::algorithm::bounds::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter out of range
    pub fn check_parameters(&self) -> Result<()> {
        self.grid()?;
        let lowest = usize::from(FIRST_SQUARE_COLOR);
        let highest = usize::from(MAX_COLOR_VALUE);
        if !(lowest..=highest).contains(&self.colors) {
            return Err(invalid_parameter(
                "colors",
                &self.colors,
                &format!("must be between {lowest} and {highest}"),
            ));
        }
        Ok(())
    }
}
