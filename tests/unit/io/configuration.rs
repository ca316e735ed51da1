//! Tests for consistency between related configuration constants

#[cfg(test)]
mod tests {
    use pathgrid::io::configuration::{
        ATTEMPTS_PER_SLOT, DEFAULT_COLORS, DEFAULT_GENERATION_TIMEOUT, DEFAULT_HEIGHT,
        DEFAULT_ORACLE_TIMEOUT, DEFAULT_WIDTH, FIRST_SQUARE_COLOR, MAX_COLOR_VALUE,
        MAX_GRID_DIMENSION, MIN_GRID_DIMENSION, MIN_STAGE_ATTEMPTS, ORACLE_POLL_INTERVAL,
    };

    // Tests default dimensions fall inside the supported range
    // Verified by setting MIN_GRID_DIMENSION above the default
    #[test]
    fn test_default_dimensions_in_range() {
        let range = MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION;
        assert!(range.contains(&DEFAULT_WIDTH));
        assert!(range.contains(&DEFAULT_HEIGHT));
        assert!(MIN_GRID_DIMENSION >= 2, "a grid needs at least one cell");
    }

    // Tests the default color count lies in the square palette
    // Verified by setting DEFAULT_COLORS to 9
    #[test]
    fn test_default_colors_in_palette() {
        let range = usize::from(FIRST_SQUARE_COLOR)..=usize::from(MAX_COLOR_VALUE);
        assert!(range.contains(&DEFAULT_COLORS));
    }

    // Tests budgets are ordered so a single check cannot outlast the session
    // Verified by swapping the two timeouts
    #[test]
    fn test_budgets_are_ordered() {
        assert!(DEFAULT_ORACLE_TIMEOUT <= DEFAULT_GENERATION_TIMEOUT);
        assert!(ORACLE_POLL_INTERVAL < DEFAULT_ORACLE_TIMEOUT);
        assert!(ATTEMPTS_PER_SLOT > 0);
        assert!(MIN_STAGE_ATTEMPTS > 0);
    }
}
