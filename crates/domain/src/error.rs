//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction and record
//! transitions, so adapters never have to fall back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A debit would take the balance below zero
    #[error("Insufficient points: have {have}, need {need}")]
    InsufficientPoints { have: u32, need: u32 },

    /// A level transition would leave the level table
    #[error("Level {requested} is beyond max level {max}")]
    LevelOutOfRange { requested: u32, max: u32 },
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when a value object refuses its input:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Weapon name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an insufficient points error
    pub fn insufficient_points(have: u32, need: u32) -> Self {
        Self::InsufficientPoints { have, need }
    }

    /// Create a level out of range error
    pub fn level_out_of_range(requested: u32, max: u32) -> Self {
        Self::LevelOutOfRange { requested, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_insufficient_points_error() {
        let err = DomainError::insufficient_points(5, 10);
        assert_eq!(err.to_string(), "Insufficient points: have 5, need 10");
    }

    #[test]
    fn test_level_out_of_range_error() {
        let err = DomainError::level_out_of_range(11, 10);
        assert!(matches!(err, DomainError::LevelOutOfRange { .. }));
        assert_eq!(err.to_string(), "Level 11 is beyond max level 10");
    }
}
