//! Error types and context management for puzzle generation

use std::fmt;
use std::path::PathBuf;

use crate::algorithm::bounds::Violation;
use crate::algorithm::builder::Stage;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Requested element counts are not feasible on the requested grid
    ///
    /// Carries every failed rule, in rule order. No build is attempted.
    Validation {
        /// Failed rules with their messages
        violations: Vec<Violation>,
    },

    /// A build stage ran out of its attempt budget before placing everything
    ///
    /// Occurs when the board is saturated for the stage's element category:
    /// - Every edge is already an obstacle
    /// - Every remaining node or edge is already specialized
    /// - Every cell already holds a symbol
    Stall {
        /// Stage that could not finish
        stage: Stage,
        /// Elements still left to place when the budget ran out
        remaining: usize,
        /// Random draws spent in the stage
        attempts: usize,
        /// Generation attempt during which the stall happened, if known
        attempt: Option<usize>,
    },

    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Puzzle data violates a structural invariant
    InvalidPuzzle {
        /// Description of the broken invariant
        reason: String,
    },

    /// Portable representation could not be serialized or parsed
    Encoding {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The solvability oracle failed to produce a verdict
    Oracle {
        /// Description of the failure
        reason: String,
    },

    /// The session was cancelled between attempts
    Cancelled {
        /// Generation attempts started before cancellation
        attempts: usize,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { violations } => {
                write!(f, "Request rejected by {} rule(s):", violations.len())?;
                for violation in violations {
                    write!(f, "\n  - {violation}")?;
                }
                Ok(())
            }
            Self::Stall {
                stage,
                remaining,
                attempts,
                attempt,
            } => {
                write!(
                    f,
                    "Generation stalled in stage '{stage}' with {remaining} element(s) left after {attempts} draws"
                )?;
                if let Some(attempt) = attempt {
                    write!(f, " (attempt {attempt})")?;
                }
                Ok(())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPuzzle { reason } => write!(f, "Invalid puzzle: {reason}"),
            Self::Encoding { source } => write!(f, "Puzzle encoding error: {source}"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Oracle { reason } => write!(f, "Solvability oracle failed: {reason}"),
            Self::Cancelled { attempts } => {
                write!(f, "Generation cancelled after {attempts} attempt(s)")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Enriches stall errors with the generation attempt they happened in
pub trait WithAttempt<T> {
    /// Record the generation attempt number on the error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the attempt number applied
    fn with_attempt(self, attempt: usize) -> Result<T>;
}

impl<T, E> WithAttempt<T> for std::result::Result<T, E>
where
    E: Into<GenerationError>,
{
    fn with_attempt(self, attempt: usize) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only stalls are tied to a specific attempt
            if let GenerationError::Stall {
                attempt: slot @ None,
                ..
            } = &mut error
            {
                *slot = Some(attempt);
            }
            error
        })
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding { source: err }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid puzzle error
pub fn invalid_puzzle(reason: &impl ToString) -> GenerationError {
    GenerationError::InvalidPuzzle {
        reason: reason.to_string(),
    }
}
