/// Feasibility limits and request validation
pub mod bounds;
/// Staged random placement of puzzle elements
pub mod builder;
/// Retry loop with budgets, cancellation and fallback
pub mod controller;
/// Solvability check interface
pub mod oracle;
/// Generation request parameters
pub mod request;

pub use bounds::{ValidationResult, validate};
pub use builder::PuzzleBuilder;
pub use controller::{GenerationController, GenerationOutcome};
pub use oracle::SolvabilityOracle;
pub use request::GenerationRequest;
