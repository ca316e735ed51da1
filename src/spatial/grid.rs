//! Lattice addressing for grid puzzles
//!
//! A `width × height` grid has four coordinate domains:
//! - nodes at `[0, width) × [0, height)`
//! - horizontal edges at `[0, width - 1) × [0, height)`, joining `(x, y)` and `(x + 1, y)`
//! - vertical edges at `[0, width) × [0, height - 1)`, joining `(x, y)` and `(x, y + 1)`
//! - cells at `[0, width - 1) × [0, height - 1)`, each bounded by four nodes
//!
//! Coordinates are plain values with structural equality and hashing, so they
//! can be used directly as set members and map keys.

use std::fmt;

use crate::io::configuration::{MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};
use crate::io::error::{Result, invalid_parameter};

/// Position of a lattice node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePos {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl NodePos {
    /// Create a node position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for NodePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Edge family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Joins `(x, y)` to `(x + 1, y)`
    Horizontal,
    /// Joins `(x, y)` to `(x, y + 1)`
    Vertical,
}

/// Position of an edge, addressed by its top-left node and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgePos {
    /// Column of the top-left endpoint
    pub x: usize,
    /// Row of the top-left endpoint
    pub y: usize,
    /// Edge family
    pub orientation: Orientation,
}

impl EdgePos {
    /// Horizontal edge starting at `(x, y)`
    pub const fn horizontal(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Horizontal,
        }
    }

    /// Vertical edge starting at `(x, y)`
    pub const fn vertical(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Vertical,
        }
    }

    /// The two nodes this edge joins
    pub const fn endpoints(&self) -> (NodePos, NodePos) {
        let end = match self.orientation {
            Orientation::Horizontal => NodePos::new(self.x + 1, self.y),
            Orientation::Vertical => NodePos::new(self.x, self.y + 1),
        };
        (NodePos::new(self.x, self.y), end)
    }
}

impl fmt::Display for EdgePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.endpoints();
        write!(f, "{a}-{b}")
    }
}

/// Position of a cell, addressed by its top-left node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl CellPos {
    /// Create a cell position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Immutable grid dimensions and the coordinate domains they define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid of `width × height` nodes
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is outside
    /// `[MIN_GRID_DIMENSION, MAX_GRID_DIMENSION]`
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self { width, height })
    }

    /// Number of node columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of node rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Shape of the node domain as `(columns, rows)`
    pub const fn node_dim(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Shape of the horizontal edge domain as `(columns, rows)`
    pub const fn horizontal_edge_dim(&self) -> (usize, usize) {
        (self.width - 1, self.height)
    }

    /// Shape of the vertical edge domain as `(columns, rows)`
    pub const fn vertical_edge_dim(&self) -> (usize, usize) {
        (self.width, self.height - 1)
    }

    /// Shape of the cell domain as `(columns, rows)`
    pub const fn cell_dim(&self) -> (usize, usize) {
        (self.width - 1, self.height - 1)
    }

    /// Total nodes
    pub const fn node_count(&self) -> usize {
        self.width * self.height
    }

    /// Total horizontal and vertical edges
    pub const fn edge_count(&self) -> usize {
        self.width * (self.height - 1) + self.height * (self.width - 1)
    }

    /// Total cells
    pub const fn cell_count(&self) -> usize {
        (self.width - 1) * (self.height - 1)
    }

    /// Whether a node lies inside the node domain
    pub const fn contains_node(&self, pos: NodePos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Whether an edge lies inside its orientation's domain
    pub const fn contains_edge(&self, pos: EdgePos) -> bool {
        let (cols, rows) = match pos.orientation {
            Orientation::Horizontal => self.horizontal_edge_dim(),
            Orientation::Vertical => self.vertical_edge_dim(),
        };
        pos.x < cols && pos.y < rows
    }

    /// Whether a cell lies inside the cell domain
    pub const fn contains_cell(&self, pos: CellPos) -> bool {
        pos.x < self.width - 1 && pos.y < self.height - 1
    }

    /// Whether a node sits on the outer boundary of the grid
    pub const fn is_border(&self, pos: NodePos) -> bool {
        self.contains_node(pos)
            && (pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1)
    }

    /// Default START corner (bottom-left)
    pub const fn default_start(&self) -> NodePos {
        NodePos::new(0, self.height - 1)
    }

    /// Default EXIT corner (top-right)
    pub const fn default_exit(&self) -> NodePos {
        NodePos::new(self.width - 1, 0)
    }

    /// All node positions, column by column
    pub fn nodes(&self) -> impl Iterator<Item = NodePos> + use<> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| NodePos::new(x, y)))
    }

    /// All edge positions, horizontal family first
    pub fn edges(&self) -> impl Iterator<Item = EdgePos> + use<> {
        let (hor_cols, hor_rows) = self.horizontal_edge_dim();
        let (ver_cols, ver_rows) = self.vertical_edge_dim();
        let horizontal = (0..hor_cols)
            .flat_map(move |x| (0..hor_rows).map(move |y| EdgePos::horizontal(x, y)));
        let vertical =
            (0..ver_cols).flat_map(move |x| (0..ver_rows).map(move |y| EdgePos::vertical(x, y)));
        horizontal.chain(vertical)
    }

    /// All cell positions, column by column
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + use<> {
        let (cols, rows) = self.cell_dim();
        (0..cols).flat_map(move |x| (0..rows).map(move |y| CellPos::new(x, y)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn check_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between {MIN_GRID_DIMENSION} and {MAX_GRID_DIMENSION}"),
        ))
    }
}
