//! Unified error types for the lotplan crates
//!
//! This module provides a common error type [`LotError`] that can represent
//! errors from any part of the system. Domain-specific error types can be
//! converted to `LotError` for uniform error handling at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use lotplan_core::{LotError, LotResult};
//!
//! fn plan_production(path: &str) -> LotResult<()> {
//!     let instance = load_instance(path)?;
//!     solve_aggregate(&instance)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all lot-sizing operations.
///
/// This enum provides a common error representation across instance
/// construction, model building, solving, and equivalence checking, allowing
/// errors from each stage to be handled uniformly.
#[derive(Error, Debug)]
pub enum LotError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Instance data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The model admits no feasible production plan
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// Solver/backend errors
    #[error("Solver error: {0}")]
    Solver(String),

    /// Disagreement between formulations that should match
    #[error("Equivalence error: {0}")]
    Equivalence(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using LotError.
pub type LotResult<T> = Result<T, LotError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for LotError {
    fn from(err: anyhow::Error) -> Self {
        LotError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for LotError {
    fn from(s: String) -> Self {
        LotError::Other(s)
    }
}

impl From<&str> for LotError {
    fn from(s: &str) -> Self {
        LotError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for LotError {
    fn from(err: serde_json::Error) -> Self {
        LotError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LotError::Infeasible("no plan covers slot 3 demand".into());
        assert!(err.to_string().contains("Infeasible"));
        assert!(err.to_string().contains("slot 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let lot_err: LotError = io_err.into();
        assert!(matches!(lot_err, LotError::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn example_fn() -> LotResult<i32> {
            Ok(42)
        }
        assert_eq!(example_fn().unwrap(), 42);
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> LotResult<()> {
            Err(LotError::Validation("negative demand".into()))
        }

        fn outer() -> LotResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
