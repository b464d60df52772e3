use thiserror::Error;

use evpool_core::DomainError;

/// Failures surfaced by [`crate::FleetService`] operations.
///
/// Every failing operation leaves the fleet state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// The input could not be decoded or failed validation.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The referenced group has no current assignment.
    #[error("group not found")]
    NotFound,

    /// The request collides with current state (e.g. a group id already in use).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl FleetError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

impl From<DomainError> for FleetError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => FleetError::InvalidPayload(msg),
            DomainError::InvalidId(msg) => FleetError::InvalidPayload(msg),
            DomainError::NotFound => FleetError::NotFound,
            DomainError::Conflict(msg) => FleetError::Conflict(msg),
        }
    }
}
