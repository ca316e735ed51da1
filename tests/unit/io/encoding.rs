//! Tests for the portable JSON representation of puzzles

#[cfg(test)]
mod tests {
    use pathgrid::GenerationError;
    use pathgrid::algorithm::GenerationRequest;
    use pathgrid::algorithm::builder::PuzzleBuilder;
    use pathgrid::io::encoding::PuzzleEncoding;
    use pathgrid::spatial::{Cell, CellColor, CellPos, EdgePos, EdgeType, Grid, NodePos, Puzzle};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::Value;

    // Tests field names and nested [x][y] layout of the JSON object
    // Verified by serializing arrays row-major
    #[test]
    fn test_json_layout() -> pathgrid::Result<()> {
        let mut puzzle = Puzzle::new(Grid::new(3, 2)?);
        puzzle.set_edge(EdgePos::horizontal(1, 0), EdgeType::Obstacle)?;
        puzzle.set_cell(CellPos::new(1, 0), Cell::square(CellColor::Yellow))?;

        let json = PuzzleEncoding::from_puzzle(&puzzle).to_json()?;
        let value: Value = serde_json::from_str(&json)?;

        assert_eq!(value["gridWidth"], 3);
        assert_eq!(value["gridHeight"], 2);
        assert_eq!(value["horEdges"], serde_json::json!([[0, 0], [2, 0]]));
        assert_eq!(value["verEdges"], serde_json::json!([[0], [0], [0]]));
        assert_eq!(value["nodeTypes"], serde_json::json!([[0, 1], [0, 0], [3, 0]]));
        assert_eq!(value["cellTypes"][1][0]["type"], 1);
        assert_eq!(value["cellTypes"][1][0]["color"], 4);
        assert_eq!(value["selectedNumObs"], 1);
        assert_eq!(value["selectedNumSqu"], 1);
        assert_eq!(value["selectedNumCol"], 4);
        Ok(())
    }

    // Tests a generated puzzle survives encoding and decoding unchanged
    // Verified by transposing arrays on decode
    #[test]
    fn test_generated_puzzle_decodes_identically() -> pathgrid::Result<()> {
        let request = GenerationRequest::default();
        let puzzle = PuzzleBuilder::new(StdRng::seed_from_u64(5)).build(&request)?;

        let encoding = PuzzleEncoding::from_puzzle(&puzzle).with_request(&request);
        let decoded = PuzzleEncoding::from_json(&encoding.to_json_pretty()?)?;

        assert_eq!(decoded.to_puzzle()?, puzzle);
        assert_eq!(decoded.request(), request);
        Ok(())
    }

    // Tests missing count fields fall back to an empty request
    // Verified by requiring every selected count
    #[test]
    fn test_counts_default_when_absent() -> pathgrid::Result<()> {
        let json = r#"{
            "gridWidth": 2, "gridHeight": 2,
            "horEdges": [[0, 0]], "verEdges": [[0], [0]],
            "nodeTypes": [[0, 1], [3, 0]],
            "cellTypes": [[{"type": 2, "color": 0}]]
        }"#;
        let encoding = PuzzleEncoding::from_json(json)?;

        assert_eq!(encoding.request(), GenerationRequest::empty(2, 2));
        let puzzle = encoding.to_puzzle()?;
        assert_eq!(puzzle.exit(), NodePos::new(1, 0));
        assert_eq!(puzzle.census().suns, 1);
        Ok(())
    }

    // Tests malformed shapes and unknown codes are rejected
    // Verified by skipping the column length check
    #[test]
    fn test_rejects_malformed_encodings() -> pathgrid::Result<()> {
        let mut encoding = PuzzleEncoding::from_puzzle(&Puzzle::new(Grid::new(3, 3)?));

        let mut short = encoding.clone();
        short.hor_edges.pop();
        assert!(matches!(
            short.to_puzzle(),
            Err(GenerationError::InvalidPuzzle { .. })
        ));

        let mut unknown = encoding.clone();
        unknown.ver_edges = vec![vec![7, 0]; 3];
        assert!(unknown.to_puzzle().is_err());

        let mut no_start = encoding.clone();
        no_start.node_types = vec![vec![0; 3]; 3];
        assert!(no_start.to_puzzle().is_err());

        encoding.grid_width = 1;
        assert!(matches!(
            encoding.to_puzzle(),
            Err(GenerationError::InvalidParameter { .. })
        ));

        assert!(matches!(
            PuzzleEncoding::from_json("{\"gridWidth\": 3}"),
            Err(GenerationError::Encoding { .. })
        ));
        Ok(())
    }
}
