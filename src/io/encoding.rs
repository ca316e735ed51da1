//! Portable puzzle representation
//!
//! A flat JSON object carrying the grid size, every annotation grid as nested
//! arrays indexed `[x][y]`, and the counts the puzzle was requested with. Type
//! codes are small integers:
//! - edges: 0 normal, 1 required, 2 obstacle
//! - nodes: 0 normal, 1 start, 2 required, 3 exit
//! - cells: 0 none, 1 square, 2 sun, 3 cancellation; colors are palette values

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::algorithm::request::GenerationRequest;
use crate::io::configuration::FIRST_SQUARE_COLOR;
use crate::io::error::{Result, invalid_puzzle};
use crate::spatial::{Cell, CellColor, CellKind, EdgeType, Grid, NodeType, Puzzle};

/// Encoded cell symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedCell {
    /// Symbol code
    #[serde(rename = "type")]
    pub kind: u8,
    /// Palette value
    pub color: u8,
}

/// Serializable snapshot of a puzzle and the request behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleEncoding {
    /// Grid width in nodes
    pub grid_width: usize,
    /// Grid height in nodes
    pub grid_height: usize,
    /// Horizontal edge codes
    pub hor_edges: Vec<Vec<u8>>,
    /// Vertical edge codes
    pub ver_edges: Vec<Vec<u8>>,
    /// Node codes
    pub node_types: Vec<Vec<u8>>,
    /// Cell symbols
    pub cell_types: Vec<Vec<EncodedCell>>,
    /// Requested obstacles
    #[serde(rename = "selectedNumObs", default)]
    pub obstacles: usize,
    /// Requested required elements
    #[serde(rename = "selectedNumReq", default)]
    pub required: usize,
    /// Requested squares
    #[serde(rename = "selectedNumSqu", default)]
    pub squares: usize,
    /// Requested suns
    #[serde(rename = "selectedNumSun", default)]
    pub suns: usize,
    /// Requested cancellations
    #[serde(rename = "selectedNumCan", default)]
    pub cancellations: usize,
    /// Requested color count
    #[serde(rename = "selectedNumCol", default = "default_colors")]
    pub colors: usize,
}

const fn default_colors() -> usize {
    FIRST_SQUARE_COLOR as usize
}

impl PuzzleEncoding {
    /// Encode a puzzle, taking the counts from what it actually holds
    pub fn from_puzzle(puzzle: &Puzzle) -> Self {
        let grid = puzzle.grid();
        let census = puzzle.census();
        let colors = census
            .square_colors
            .iter()
            .next_back()
            .map_or_else(default_colors, |color| usize::from(color.value()));

        Self {
            grid_width: grid.width(),
            grid_height: grid.height(),
            hor_edges: encode_grid(puzzle.horizontal_edges(), edge_code),
            ver_edges: encode_grid(puzzle.vertical_edges(), edge_code),
            node_types: encode_grid(puzzle.nodes(), node_code),
            cell_types: encode_grid(puzzle.cells(), |cell| EncodedCell {
                kind: cell_code(cell.kind),
                color: cell.color.value(),
            }),
            obstacles: census.obstacles,
            required: census.required(),
            squares: census.squares,
            suns: census.suns,
            cancellations: census.cancellations,
            colors,
        }
    }

    /// Replace the counts with those of the originating request
    #[must_use]
    pub const fn with_request(mut self, request: &GenerationRequest) -> Self {
        self.obstacles = request.obstacles;
        self.required = request.required;
        self.squares = request.squares;
        self.suns = request.suns;
        self.cancellations = request.cancellations;
        self.colors = request.colors;
        self
    }

    /// Request recorded in the encoding
    pub const fn request(&self) -> GenerationRequest {
        GenerationRequest {
            width: self.grid_width,
            height: self.grid_height,
            obstacles: self.obstacles,
            required: self.required,
            squares: self.squares,
            suns: self.suns,
            cancellations: self.cancellations,
            colors: self.colors,
        }
    }

    /// Rebuild the puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the grid size is out of range, an array has the
    /// wrong shape, a code is unknown, or the START/EXIT invariant is broken
    pub fn to_puzzle(&self) -> Result<Puzzle> {
        let grid = Grid::new(self.grid_width, self.grid_height)?;
        Puzzle::from_parts(
            grid,
            decode_grid("nodeTypes", &self.node_types, grid.node_dim(), node_from_code)?,
            decode_grid(
                "horEdges",
                &self.hor_edges,
                grid.horizontal_edge_dim(),
                edge_from_code,
            )?,
            decode_grid(
                "verEdges",
                &self.ver_edges,
                grid.vertical_edge_dim(),
                edge_from_code,
            )?,
            decode_grid("cellTypes", &self.cell_types, grid.cell_dim(), |cell| {
                Ok(Cell {
                    kind: cell_from_code(cell.kind)?,
                    color: CellColor::try_from(cell.color)?,
                })
            })?,
        )
    }

    /// Serialize to compact JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid encoding
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn encode_grid<T: Copy, U>(array: &Array2<T>, code: impl Fn(T) -> U) -> Vec<Vec<U>> {
    array
        .outer_iter()
        .map(|column| column.iter().map(|&value| code(value)).collect())
        .collect()
}

fn decode_grid<T, U: Copy>(
    name: &str,
    columns: &[Vec<U>],
    dim: (usize, usize),
    decode: impl Fn(U) -> Result<T>,
) -> Result<Array2<T>> {
    if columns.len() != dim.0 || columns.iter().any(|column| column.len() != dim.1) {
        return Err(invalid_puzzle(&format!(
            "{name} must be {} columns of {} entries",
            dim.0, dim.1
        )));
    }
    let flat = columns
        .iter()
        .flatten()
        .map(|&code| decode(code))
        .collect::<Result<Vec<T>>>()?;
    Array2::from_shape_vec(dim, flat).map_err(|error| invalid_puzzle(&error))
}

const fn edge_code(edge: EdgeType) -> u8 {
    match edge {
        EdgeType::Normal => 0,
        EdgeType::Required => 1,
        EdgeType::Obstacle => 2,
    }
}

fn edge_from_code(code: u8) -> Result<EdgeType> {
    match code {
        0 => Ok(EdgeType::Normal),
        1 => Ok(EdgeType::Required),
        2 => Ok(EdgeType::Obstacle),
        _ => Err(invalid_puzzle(&format!("unknown edge code {code}"))),
    }
}

const fn node_code(node: NodeType) -> u8 {
    match node {
        NodeType::Normal => 0,
        NodeType::Start => 1,
        NodeType::Required => 2,
        NodeType::Exit => 3,
    }
}

fn node_from_code(code: u8) -> Result<NodeType> {
    match code {
        0 => Ok(NodeType::Normal),
        1 => Ok(NodeType::Start),
        2 => Ok(NodeType::Required),
        3 => Ok(NodeType::Exit),
        _ => Err(invalid_puzzle(&format!("unknown node code {code}"))),
    }
}

const fn cell_code(kind: CellKind) -> u8 {
    match kind {
        CellKind::None => 0,
        CellKind::Square => 1,
        CellKind::Sun => 2,
        CellKind::Cancellation => 3,
    }
}

fn cell_from_code(code: u8) -> Result<CellKind> {
    match code {
        0 => Ok(CellKind::None),
        1 => Ok(CellKind::Square),
        2 => Ok(CellKind::Sun),
        3 => Ok(CellKind::Cancellation),
        _ => Err(invalid_puzzle(&format!("unknown cell code {code}"))),
    }
}
