//! Tests for puzzle state, terminal invariants and the element census

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use pathgrid::GenerationError;
    use pathgrid::spatial::{
        Cell, CellColor, CellKind, CellPos, EdgePos, EdgeType, Grid, NodePos, NodeType, Puzzle,
    };

    fn puzzle(width: usize, height: usize) -> pathgrid::Result<Puzzle> {
        Ok(Puzzle::new(Grid::new(width, height)?))
    }

    // Tests a fresh puzzle holds only START and EXIT at the default corners
    // Verified by leaving EXIT unset in the node array
    #[test]
    fn test_fresh_puzzle_has_only_terminals() -> pathgrid::Result<()> {
        let puzzle = puzzle(4, 3)?;

        assert_eq!(puzzle.node(NodePos::new(0, 2)), Some(NodeType::Start));
        assert_eq!(puzzle.node(NodePos::new(3, 0)), Some(NodeType::Exit));
        assert_eq!(puzzle.start(), NodePos::new(0, 2));
        assert_eq!(puzzle.exit(), NodePos::new(3, 0));

        let census = puzzle.census();
        assert_eq!(census.obstacles, 0);
        assert_eq!(census.required(), 0);
        assert_eq!(census.squares + census.suns + census.cancellations, 0);
        assert!(puzzle.cells().iter().all(Cell::is_empty));
        Ok(())
    }

    // Tests obstacles are treated as absent edges while required edges remain
    // Verified by treating obstacles as existing
    #[test]
    fn test_obstacle_edges_do_not_exist() -> pathgrid::Result<()> {
        let mut puzzle = puzzle(3, 3)?;
        puzzle.set_edge(EdgePos::horizontal(0, 1), EdgeType::Obstacle)?;
        puzzle.set_edge(EdgePos::vertical(2, 0), EdgeType::Required)?;

        assert!(!puzzle.hor_edge_exists(0, 1));
        assert!(puzzle.hor_edge_exists(1, 1));
        assert!(puzzle.ver_edge_exists(2, 0));
        assert!(!puzzle.ver_edge_exists(0, 2));
        assert!(puzzle.node_exists(2, 2));
        assert!(!puzzle.node_exists(3, 0));
        Ok(())
    }

    // Tests set_node refuses terminal types and terminal positions
    // Verified by allowing REQUIRED on the START node
    #[test]
    fn test_set_node_protects_terminals() -> pathgrid::Result<()> {
        let mut puzzle = puzzle(3, 3)?;

        assert!(puzzle.set_node(NodePos::new(1, 1), NodeType::Start).is_err());
        assert!(puzzle.set_node(NodePos::new(1, 1), NodeType::Exit).is_err());
        assert!(puzzle.set_node(puzzle.start(), NodeType::Required).is_err());
        assert!(puzzle.set_node(puzzle.exit(), NodeType::Normal).is_err());
        assert!(matches!(
            puzzle.set_node(NodePos::new(5, 5), NodeType::Required),
            Err(GenerationError::InvalidParameter { .. })
        ));

        puzzle.set_node(NodePos::new(1, 1), NodeType::Required)?;
        assert_eq!(puzzle.census().required_nodes, 1);
        Ok(())
    }

    // Tests EXIT can only move to border nodes and never onto START
    // Verified by skipping the border check
    #[test]
    fn test_move_exit_requires_border() -> pathgrid::Result<()> {
        let mut puzzle = puzzle(4, 4)?;

        assert!(puzzle.move_exit(NodePos::new(1, 1)).is_err());
        assert!(puzzle.move_exit(puzzle.start()).is_err());

        puzzle.move_exit(NodePos::new(3, 2))?;
        assert_eq!(puzzle.exit(), NodePos::new(3, 2));
        assert_eq!(puzzle.node(NodePos::new(3, 0)), Some(NodeType::Normal));
        assert_eq!(puzzle.node(NodePos::new(3, 2)), Some(NodeType::Exit));
        Ok(())
    }

    // Tests moving START keeps exactly one START node
    // Verified by not clearing the previous START
    #[test]
    fn test_move_start_keeps_single_start() -> pathgrid::Result<()> {
        let mut puzzle = puzzle(4, 4)?;
        puzzle.move_start(NodePos::new(1, 2))?;

        let starts = puzzle
            .nodes()
            .iter()
            .filter(|&&node| node == NodeType::Start)
            .count();
        assert_eq!(starts, 1);
        assert_eq!(puzzle.start(), NodePos::new(1, 2));
        assert!(puzzle.move_start(puzzle.exit()).is_err());
        Ok(())
    }

    // Tests a cell outside the grid is refused and named in the error
    // Verified by writing through an unchecked index
    #[test]
    fn test_set_cell_outside_grid() -> pathgrid::Result<()> {
        let mut puzzle = puzzle(3, 3)?;
        let result = puzzle.set_cell(CellPos::new(2, 0), Cell::sun());

        assert!(matches!(
            result,
            Err(GenerationError::InvalidParameter { parameter: "cell", ref value, .. })
                if value == "(2, 0)"
        ));
        Ok(())
    }

    // Tests census counts every category and the distinct square colors
    // Verified by counting required edges as obstacles
    #[test]
    fn test_census_counts_each_category() -> pathgrid::Result<()> {
        let mut puzzle = puzzle(4, 4)?;
        puzzle.set_edge(EdgePos::horizontal(0, 0), EdgeType::Obstacle)?;
        puzzle.set_edge(EdgePos::vertical(1, 1), EdgeType::Required)?;
        puzzle.set_node(NodePos::new(2, 2), NodeType::Required)?;
        puzzle.set_cell(CellPos::new(0, 0), Cell::square(CellColor::Cyan))?;
        puzzle.set_cell(CellPos::new(1, 0), Cell::square(CellColor::Red))?;
        puzzle.set_cell(CellPos::new(2, 0), Cell::square(CellColor::Cyan))?;
        puzzle.set_cell(CellPos::new(0, 1), Cell::sun())?;
        puzzle.set_cell(CellPos::new(1, 1), Cell::cancellation())?;

        let census = puzzle.census();
        assert_eq!(census.obstacles, 1);
        assert_eq!(census.required_edges, 1);
        assert_eq!(census.required_nodes, 1);
        assert_eq!(census.required(), 2);
        assert_eq!(census.squares, 3);
        assert_eq!(census.suns, 1);
        assert_eq!(census.cancellations, 1);
        assert_eq!(
            census.square_colors.into_iter().collect::<Vec<_>>(),
            vec![CellColor::Cyan, CellColor::Red]
        );
        Ok(())
    }

    // Tests the palette maps a color count to values 2..=count
    // Verified by starting the palette at value 1
    #[test]
    fn test_square_palette() {
        assert_eq!(CellColor::square_palette(2), vec![CellColor::Cyan]);
        assert_eq!(
            CellColor::square_palette(4),
            vec![CellColor::Cyan, CellColor::Magenta, CellColor::Yellow]
        );
        assert_eq!(CellColor::square_palette(8).len(), 7);
        assert_eq!(CellColor::square_palette(12).len(), 7);
        assert_eq!(CellColor::Orange.value(), 8);
        assert!(CellColor::try_from(9).is_err());
    }

    // Tests symbols carry their sentinel colors
    // Verified by coloring suns white
    #[test]
    fn test_symbol_colors() {
        assert_eq!(Cell::sun().color, CellColor::Black);
        assert_eq!(Cell::cancellation().color, CellColor::White);
        assert_eq!(Cell::sun().kind, CellKind::Sun);
        assert!(!Cell::cancellation().is_empty());
        assert_eq!(CellColor::Magenta.to_string(), "magenta");
    }

    // Tests from_parts rejects duplicate EXIT nodes and inner EXIT placement
    // Verified by skipping the uniqueness scan
    #[test]
    fn test_from_parts_checks_terminals() -> pathgrid::Result<()> {
        let grid = Grid::new(3, 3)?;
        let base = Puzzle::new(grid);

        let mut doubled = base.nodes().clone();
        if let Some(node) = doubled.get_mut([0, 0]) {
            *node = NodeType::Exit;
        }
        let result = Puzzle::from_parts(
            grid,
            doubled,
            base.horizontal_edges().clone(),
            base.vertical_edges().clone(),
            base.cells().clone(),
        );
        assert!(matches!(result, Err(GenerationError::InvalidPuzzle { .. })));

        let mut inner = base.nodes().clone();
        if let Some(node) = inner.get_mut([2, 0]) {
            *node = NodeType::Normal;
        }
        if let Some(node) = inner.get_mut([1, 1]) {
            *node = NodeType::Exit;
        }
        let result = Puzzle::from_parts(
            grid,
            inner,
            base.horizontal_edges().clone(),
            base.vertical_edges().clone(),
            base.cells().clone(),
        );
        assert!(result.is_err());

        let wrong_shape = Array2::from_elem((3, 3), EdgeType::Normal);
        let result = Puzzle::from_parts(
            grid,
            base.nodes().clone(),
            wrong_shape,
            base.vertical_edges().clone(),
            base.cells().clone(),
        );
        assert!(result.is_err());

        let rebuilt = Puzzle::from_parts(
            grid,
            base.nodes().clone(),
            base.horizontal_edges().clone(),
            base.vertical_edges().clone(),
            base.cells().clone(),
        )?;
        assert_eq!(rebuilt, base);
        Ok(())
    }
}
