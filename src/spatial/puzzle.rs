//! Puzzle state: node, edge and cell annotations over a grid
//!
//! Every array is indexed `[x, y]` within its own coordinate domain. A fresh
//! puzzle has all elements NORMAL/NONE except the START and EXIT nodes, which
//! sit at the grid's default corners. Exactly one START and one EXIT exist at
//! all times; the setters refuse any change that would break this.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array2;

use crate::io::configuration::{FIRST_SQUARE_COLOR, MAX_COLOR_VALUE};
use crate::io::error::{GenerationError, Result, invalid_parameter, invalid_puzzle};
use crate::spatial::grid::{CellPos, EdgePos, Grid, NodePos, Orientation};

/// Node annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    /// Plain node
    #[default]
    Normal,
    /// Where the path begins
    Start,
    /// Any solution path must pass through this node
    Required,
    /// Where the path ends; only legal on the border
    Exit,
}

/// Edge annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeType {
    /// Plain edge
    #[default]
    Normal,
    /// Any solution path must use this edge
    Required,
    /// Removed from the traversable graph
    Obstacle,
}

/// Cell symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    /// No symbol
    #[default]
    None,
    /// Colored square, separated from other colors by the path
    Square,
    /// Pairs with one other symbol of its color in the same region
    Sun,
    /// Negates one other symbol in its region
    Cancellation,
}

/// Palette shared by all cell symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CellColor {
    /// Sun sentinel
    #[default]
    Black,
    /// Cancellation sentinel
    White,
    /// First square color
    Cyan,
    /// Square color
    Magenta,
    /// Square color
    Yellow,
    /// Square color
    Red,
    /// Square color
    Green,
    /// Square color
    Blue,
    /// Last square color
    Orange,
}

impl CellColor {
    /// Color carried by generated suns
    pub const SUN: Self = Self::Black;
    /// Color carried by generated cancellations
    pub const CANCELLATION: Self = Self::White;

    /// Palette value of this color
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Color name as used by renderers
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Orange => "orange",
        }
    }

    /// Square colors available for a request with `colors` as its color count
    ///
    /// Square colors start at `FIRST_SQUARE_COLOR`, so a color count of `n`
    /// yields the `n - 1` colors with values `2..=n`.
    pub fn square_palette(colors: usize) -> Vec<Self> {
        (FIRST_SQUARE_COLOR..=MAX_COLOR_VALUE)
            .filter(|&value| usize::from(value) <= colors)
            .filter_map(|value| Self::try_from(value).ok())
            .collect()
    }
}

impl TryFrom<u8> for CellColor {
    type Error = GenerationError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Black,
            1 => Self::White,
            2 => Self::Cyan,
            3 => Self::Magenta,
            4 => Self::Yellow,
            5 => Self::Red,
            6 => Self::Green,
            7 => Self::Blue,
            8 => Self::Orange,
            _ => {
                return Err(invalid_parameter(
                    "color",
                    &value,
                    &format!("palette values run from 0 to {MAX_COLOR_VALUE}"),
                ));
            }
        })
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cell symbol together with its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Symbol kind
    pub kind: CellKind,
    /// Symbol color; ignored for empty cells
    pub color: CellColor,
}

impl Cell {
    /// Cell without a symbol
    pub const EMPTY: Self = Self {
        kind: CellKind::None,
        color: CellColor::Black,
    };

    /// Square of the given color
    pub const fn square(color: CellColor) -> Self {
        Self {
            kind: CellKind::Square,
            color,
        }
    }

    /// Sun in the sun sentinel color
    pub const fn sun() -> Self {
        Self {
            kind: CellKind::Sun,
            color: CellColor::SUN,
        }
    }

    /// Cancellation in the cancellation sentinel color
    pub const fn cancellation() -> Self {
        Self {
            kind: CellKind::Cancellation,
            color: CellColor::CANCELLATION,
        }
    }

    /// Whether the cell has no symbol
    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, CellKind::None)
    }
}

/// Realized element counts of a puzzle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    /// Obstacle edges
    pub obstacles: usize,
    /// Required nodes
    pub required_nodes: usize,
    /// Required edges
    pub required_edges: usize,
    /// Square cells
    pub squares: usize,
    /// Sun cells
    pub suns: usize,
    /// Cancellation cells
    pub cancellations: usize,
    /// Distinct colors found on squares
    pub square_colors: BTreeSet<CellColor>,
}

impl Census {
    /// Required nodes and edges together
    pub const fn required(&self) -> usize {
        self.required_nodes + self.required_edges
    }
}

/// A grid puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    grid: Grid,
    nodes: Array2<NodeType>,
    horizontal_edges: Array2<EdgeType>,
    vertical_edges: Array2<EdgeType>,
    cells: Array2<Cell>,
    start: NodePos,
    exit: NodePos,
}

impl Puzzle {
    /// Fresh puzzle with only START and EXIT at their default corners
    pub fn new(grid: Grid) -> Self {
        let start = grid.default_start();
        let exit = grid.default_exit();

        let mut nodes = Array2::from_elem(grid.node_dim(), NodeType::Normal);
        if let Some(node) = nodes.get_mut([start.x, start.y]) {
            *node = NodeType::Start;
        }
        if let Some(node) = nodes.get_mut([exit.x, exit.y]) {
            *node = NodeType::Exit;
        }

        Self {
            grid,
            nodes,
            horizontal_edges: Array2::from_elem(grid.horizontal_edge_dim(), EdgeType::Normal),
            vertical_edges: Array2::from_elem(grid.vertical_edge_dim(), EdgeType::Normal),
            cells: Array2::from_elem(grid.cell_dim(), Cell::EMPTY),
            start,
            exit,
        }
    }

    /// Assemble a puzzle from raw arrays, checking shapes and invariants
    ///
    /// # Errors
    ///
    /// Returns an error if any array has the wrong shape for `grid`, if there
    /// is not exactly one START and one EXIT node, or if EXIT is off the border
    pub fn from_parts(
        grid: Grid,
        nodes: Array2<NodeType>,
        horizontal_edges: Array2<EdgeType>,
        vertical_edges: Array2<EdgeType>,
        cells: Array2<Cell>,
    ) -> Result<Self> {
        check_shape("node", nodes.dim(), grid.node_dim())?;
        check_shape(
            "horizontal edge",
            horizontal_edges.dim(),
            grid.horizontal_edge_dim(),
        )?;
        check_shape(
            "vertical edge",
            vertical_edges.dim(),
            grid.vertical_edge_dim(),
        )?;
        check_shape("cell", cells.dim(), grid.cell_dim())?;

        let start = find_unique(&nodes, NodeType::Start)?;
        let exit = find_unique(&nodes, NodeType::Exit)?;
        if !grid.is_border(exit) {
            return Err(invalid_puzzle(&format!("exit {exit} is not on the border")));
        }

        Ok(Self {
            grid,
            nodes,
            horizontal_edges,
            vertical_edges,
            cells,
            start,
            exit,
        })
    }

    /// Grid this puzzle lives on
    pub const fn grid(&self) -> Grid {
        self.grid
    }

    /// START node position
    pub const fn start(&self) -> NodePos {
        self.start
    }

    /// EXIT node position
    pub const fn exit(&self) -> NodePos {
        self.exit
    }

    /// Node types, indexed `[x, y]`
    pub const fn nodes(&self) -> &Array2<NodeType> {
        &self.nodes
    }

    /// Horizontal edge types, indexed `[x, y]`
    pub const fn horizontal_edges(&self) -> &Array2<EdgeType> {
        &self.horizontal_edges
    }

    /// Vertical edge types, indexed `[x, y]`
    pub const fn vertical_edges(&self) -> &Array2<EdgeType> {
        &self.vertical_edges
    }

    /// Cell symbols, indexed `[x, y]`
    pub const fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Node type at a position, if inside the grid
    pub fn node(&self, pos: NodePos) -> Option<NodeType> {
        self.nodes.get([pos.x, pos.y]).copied()
    }

    /// Edge type at a position, if inside the grid
    pub fn edge(&self, pos: EdgePos) -> Option<EdgeType> {
        match pos.orientation {
            Orientation::Horizontal => self.horizontal_edges.get([pos.x, pos.y]).copied(),
            Orientation::Vertical => self.vertical_edges.get([pos.x, pos.y]).copied(),
        }
    }

    /// Cell at a position, if inside the grid
    pub fn cell(&self, pos: CellPos) -> Option<Cell> {
        self.cells.get([pos.x, pos.y]).copied()
    }

    /// Whether `(x, y)` is a node of the grid
    pub const fn node_exists(&self, x: usize, y: usize) -> bool {
        self.grid.contains_node(NodePos::new(x, y))
    }

    /// Whether the horizontal edge at `(x, y)` is in bounds and not an obstacle
    pub fn hor_edge_exists(&self, x: usize, y: usize) -> bool {
        self.edge_exists(EdgePos::horizontal(x, y))
    }

    /// Whether the vertical edge at `(x, y)` is in bounds and not an obstacle
    pub fn ver_edge_exists(&self, x: usize, y: usize) -> bool {
        self.edge_exists(EdgePos::vertical(x, y))
    }

    /// Whether an edge is part of the traversable graph
    ///
    /// Obstacles count as nonexistent, not merely blocked.
    pub fn edge_exists(&self, pos: EdgePos) -> bool {
        self.edge(pos)
            .is_some_and(|edge| edge != EdgeType::Obstacle)
    }

    /// Change a node that is neither START nor EXIT to NORMAL or REQUIRED
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid, if `node_type`
    /// is START or EXIT (use [`Self::move_start`] / [`Self::move_exit`]), or
    /// if the target node is currently START or EXIT
    pub fn set_node(&mut self, pos: NodePos, node_type: NodeType) -> Result<()> {
        if matches!(node_type, NodeType::Start | NodeType::Exit) {
            return Err(invalid_puzzle(&format!(
                "{node_type:?} is placed with its dedicated setter"
            )));
        }
        if pos == self.start || pos == self.exit {
            return Err(invalid_puzzle(&format!(
                "node {pos} holds the path terminal and cannot be overwritten"
            )));
        }
        let node = self
            .nodes
            .get_mut([pos.x, pos.y])
            .ok_or_else(|| invalid_parameter("node", &pos, &"outside the grid"))?;
        *node = node_type;
        Ok(())
    }

    /// Change an edge annotation
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is outside the grid
    pub fn set_edge(&mut self, pos: EdgePos, edge_type: EdgeType) -> Result<()> {
        let edges = match pos.orientation {
            Orientation::Horizontal => &mut self.horizontal_edges,
            Orientation::Vertical => &mut self.vertical_edges,
        };
        let edge = edges
            .get_mut([pos.x, pos.y])
            .ok_or_else(|| invalid_parameter("edge", &pos, &"outside the grid"))?;
        *edge = edge_type;
        Ok(())
    }

    /// Change a cell symbol
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the grid
    pub fn set_cell(&mut self, pos: CellPos, cell: Cell) -> Result<()> {
        let slot = self
            .cells
            .get_mut([pos.x, pos.y])
            .ok_or_else(|| invalid_parameter("cell", &pos, &"outside the grid"))?;
        *slot = cell;
        Ok(())
    }

    /// Relocate START, turning the old START node NORMAL
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid or holds EXIT
    pub fn move_start(&mut self, pos: NodePos) -> Result<()> {
        if pos == self.exit {
            return Err(invalid_puzzle(&format!("node {pos} already holds the exit")));
        }
        self.relocate_terminal(self.start, pos, NodeType::Start)?;
        self.start = pos;
        Ok(())
    }

    /// Relocate EXIT, turning the old EXIT node NORMAL
    ///
    /// # Errors
    ///
    /// Returns an error if the position is not a border node or holds START
    pub fn move_exit(&mut self, pos: NodePos) -> Result<()> {
        if !self.grid.is_border(pos) {
            return Err(invalid_puzzle(&format!(
                "exit must be on the border, {pos} is not"
            )));
        }
        if pos == self.start {
            return Err(invalid_puzzle(&format!("node {pos} already holds the start")));
        }
        self.relocate_terminal(self.exit, pos, NodeType::Exit)?;
        self.exit = pos;
        Ok(())
    }

    fn relocate_terminal(&mut self, from: NodePos, to: NodePos, node_type: NodeType) -> Result<()> {
        if !self.grid.contains_node(to) {
            return Err(invalid_parameter("node", &to, &"outside the grid"));
        }
        if let Some(node) = self.nodes.get_mut([from.x, from.y]) {
            *node = NodeType::Normal;
        }
        if let Some(node) = self.nodes.get_mut([to.x, to.y]) {
            *node = node_type;
        }
        Ok(())
    }

    /// Count every specialized element
    pub fn census(&self) -> Census {
        let mut census = Census {
            required_nodes: self
                .nodes
                .iter()
                .filter(|&&node| node == NodeType::Required)
                .count(),
            ..Census::default()
        };

        for &edge in self.horizontal_edges.iter().chain(self.vertical_edges.iter()) {
            match edge {
                EdgeType::Obstacle => census.obstacles += 1,
                EdgeType::Required => census.required_edges += 1,
                EdgeType::Normal => {}
            }
        }

        for cell in &self.cells {
            match cell.kind {
                CellKind::Square => {
                    census.squares += 1;
                    census.square_colors.insert(cell.color);
                }
                CellKind::Sun => census.suns += 1,
                CellKind::Cancellation => census.cancellations += 1,
                CellKind::None => {}
            }
        }

        census
    }
}

fn check_shape(domain: &str, actual: (usize, usize), expected: (usize, usize)) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(invalid_puzzle(&format!(
            "{domain} grid is {}x{}, expected {}x{}",
            actual.0, actual.1, expected.0, expected.1
        )))
    }
}

fn find_unique(nodes: &Array2<NodeType>, wanted: NodeType) -> Result<NodePos> {
    let mut found = nodes
        .indexed_iter()
        .filter(|&(_, &node)| node == wanted)
        .map(|((x, y), _)| NodePos::new(x, y));

    match (found.next(), found.next()) {
        (Some(pos), None) => Ok(pos),
        (None, _) => Err(invalid_puzzle(&format!("no {wanted:?} node"))),
        (Some(_), Some(_)) => Err(invalid_puzzle(&format!(
            "more than one {wanted:?} node"
        ))),
    }
}
