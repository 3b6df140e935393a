//! Error types for port operations.

/// Progression service errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The service is loaded but not ready to answer (e.g. between maps).
    #[error("Progression service unavailable")]
    Unavailable,

    /// Any other failure inside the service - includes operation name for tracing.
    #[error("Progression fault in {operation}: {message}")]
    Fault {
        operation: &'static str,
        message: String,
    },
}

impl ProgressionError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Fault error with operation context.
    pub fn fault(operation: &'static str, message: impl ToString) -> Self {
        Self::Fault {
            operation,
            message: message.to_string(),
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failures while touching a live player entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("player entity is no longer valid")]
    Gone,
    #[error("player is not alive")]
    NotAlive,
    #[error("player pawn has no weapon services")]
    NoWeaponServices,
    #[error("host rejected the request: {0}")]
    Rejected(String),
}
