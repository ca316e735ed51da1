//! Feasibility limits for puzzle requests
//!
//! Decides from the grid size and the requested counts whether a puzzle can
//! exist at all, before any random placement happens. The limits are closed
//! formulas over the grid dimensions with corrections that depend on the
//! parity of `width - 1` and `height - 1`.

use std::fmt;

use crate::algorithm::request::GenerationRequest;
use crate::io::configuration::{FIRST_SQUARE_COLOR, MAX_COLOR_VALUE};

/// Derived capacity of a `width × height` grid
///
/// Quantities are signed: the required-element bound shrinks as obstacles
/// grow and may drop below zero. Counts are compared after saturating at
/// `i64::MAX`, so an oversized count always fails its capacity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Nodes in the grid
    pub max_nodes: i64,
    /// Horizontal plus vertical edges
    pub max_edges: i64,
    /// Cells in the grid
    pub max_cells: i64,
    /// Most nodes and edges that can be required simultaneously
    pub max_required: i64,
    /// Obstacle count from which every further pair of obstacles costs
    /// four required elements
    pub obstacle_threshold: i64,
}

impl Capacity {
    /// Compute the capacity of a grid
    ///
    /// Dimensions too large for `i64` saturate, as does every derived
    /// quantity.
    pub const fn for_grid(width: usize, height: usize) -> Self {
        let width = saturate(width);
        let height = saturate(height);

        let max_nodes = width.saturating_mul(height);
        let max_edges = width
            .saturating_mul(height - 1)
            .saturating_add(height.saturating_mul(width - 1));
        let max_cells = (width - 1).saturating_mul(height - 1);

        // Interior cells bound how many nodes and edges a single path can be
        // forced through; an odd-by-odd cell grid loses two more
        let either_even = (width - 1) % 2 == 0 || (height - 1) % 2 == 0;
        let parity_loss = if either_even {
            max_cells
        } else {
            max_cells.saturating_add(2)
        };
        let max_required = max_nodes
            .saturating_add(max_edges)
            .saturating_sub(2)
            .saturating_sub(parity_loss);

        let obstacle_threshold = if either_even {
            max_cells.saturating_add(1)
        } else {
            max_cells.saturating_add(2)
        };

        Self {
            max_nodes,
            max_edges,
            max_cells,
            max_required,
            obstacle_threshold,
        }
    }

    /// Required-element bound once `obstacles` obstacles are placed
    ///
    /// Every pair of obstacles starting at the threshold costs four required
    /// elements; a lone obstacle at the threshold already costs a full pair.
    pub const fn required_limit(&self, obstacles: i64) -> i64 {
        if obstacles < self.obstacle_threshold {
            return self.max_required;
        }
        let pairs = obstacles
            .saturating_sub(self.obstacle_threshold)
            .saturating_add(2)
            / 2;
        self.max_required.saturating_sub(pairs.saturating_mul(4))
    }
}

/// Convert a count, saturating at `i64::MAX`
const fn saturate(value: usize) -> i64 {
    if value > i64::MAX as usize {
        i64::MAX
    } else {
        value as i64
    }
}

/// Largest counts worth offering for a grid, per element category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorLimits {
    /// Obstacles: every edge except a spanning path's worth
    pub max_obstacles: usize,
    /// Required nodes and edges with no obstacles placed
    pub max_required: usize,
    /// Squares, suns or cancellations individually
    pub max_cells: usize,
    /// Smallest color count
    pub min_colors: usize,
    /// Largest color count
    pub max_colors: usize,
}

impl SelectorLimits {
    /// Compute the limits for a grid
    pub const fn for_grid(width: usize, height: usize) -> Self {
        let capacity = Capacity::for_grid(width, height);
        let max_obstacles = capacity
            .max_edges
            .saturating_sub(saturate(width) - 1)
            .saturating_sub(saturate(height) - 1);
        Self {
            max_obstacles: clamp_to_usize(max_obstacles),
            max_required: clamp_to_usize(capacity.max_required),
            max_cells: clamp_to_usize(capacity.max_cells),
            min_colors: FIRST_SQUARE_COLOR as usize,
            max_colors: MAX_COLOR_VALUE as usize,
        }
    }
}

const fn clamp_to_usize(value: i64) -> usize {
    if value < 0 { 0 } else { value as usize }
}

/// Feasibility rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Squares, suns and cancellations must fit in the cells
    CellCapacity,
    /// Obstacles and required elements must fit in the edges and nodes
    GraphCapacity,
    /// Required elements must fit the bound left by the obstacles
    RequiredForObstacles,
    /// Squares must cover every requested color
    SquaresCoverColors,
    /// An odd number of suns needs a cancellation
    UnpairedSun,
    /// With an even number of suns and a single square color, cancellations
    /// must come in pairs
    CancellationParity,
}

impl Rule {
    /// Stable identifier
    pub const fn id(self) -> &'static str {
        match self {
            Self::CellCapacity => "cell-capacity",
            Self::GraphCapacity => "graph-capacity",
            Self::RequiredForObstacles => "required-for-obstacles",
            Self::SquaresCoverColors => "squares-cover-colors",
            Self::UnpairedSun => "unpaired-sun",
            Self::CancellationParity => "cancellation-parity",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One failed rule with a user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule that failed
    pub rule: Rule,
    /// Explanation including the offending values
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// Outcome of validating a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Failed rules, in rule order
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Whether every rule held
    pub const fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether a specific rule failed
    pub fn violates(&self, rule: Rule) -> bool {
        self.violations.iter().any(|violation| violation.rule == rule)
    }

    fn fail(&mut self, rule: Rule, message: String) {
        self.violations.push(Violation { rule, message });
    }
}

/// Validate a request against every feasibility rule
pub fn validate(request: &GenerationRequest) -> ValidationResult {
    validate_counts(
        request.width,
        request.height,
        request.obstacles,
        request.required,
        request.squares,
        request.suns,
        request.cancellations,
        request.colors,
    )
}

/// Validate raw counts against every feasibility rule
///
/// All rules are evaluated; a failure never hides the ones after it.
pub fn validate_counts(
    width: usize,
    height: usize,
    obstacles: usize,
    required: usize,
    squares: usize,
    suns: usize,
    cancellations: usize,
    colors: usize,
) -> ValidationResult {
    let capacity = Capacity::for_grid(width, height);
    let symbols = saturate(squares)
        .saturating_add(saturate(suns))
        .saturating_add(saturate(cancellations));
    let placed = saturate(obstacles).saturating_add(saturate(required));
    let required_limit = capacity.required_limit(saturate(obstacles));

    let mut result = ValidationResult::default();

    if symbols > capacity.max_cells {
        result.fail(
            Rule::CellCapacity,
            format!(
                "{squares} squares, {suns} suns and {cancellations} cancellations do not fit in {} cells",
                capacity.max_cells
            ),
        );
    }

    let graph_slots = capacity
        .max_edges
        .saturating_add(capacity.max_nodes)
        .saturating_sub(2);
    if placed > graph_slots {
        result.fail(
            Rule::GraphCapacity,
            format!(
                "{obstacles} obstacles and {required} required elements do not fit in {graph_slots} edges and nodes"
            ),
        );
    }

    if saturate(required) > required_limit {
        result.fail(
            Rule::RequiredForObstacles,
            format!(
                "{required} required elements exceed the limit of {required_limit} for {obstacles} obstacles"
            ),
        );
    }

    if squares != 0 && squares < colors.saturating_sub(1) {
        result.fail(
            Rule::SquaresCoverColors,
            format!(
                "{squares} squares cannot show all {} square colors",
                colors.saturating_sub(1)
            ),
        );
    }

    if suns % 2 == 1 && cancellations == 0 {
        result.fail(
            Rule::UnpairedSun,
            format!("{suns} suns is odd, so at least one cancellation is needed"),
        );
    }

    if suns % 2 == 0 && colors == 2 && cancellations % 2 == 1 {
        result.fail(
            Rule::CancellationParity,
            format!(
                "{cancellations} cancellations is odd with nothing left for the last one to cancel"
            ),
        );
    }

    result
}
