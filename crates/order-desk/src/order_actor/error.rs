//! Failures of order operations.

use crate::model::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// No order has the requested id. Carries the id exactly as it was asked for, which
    /// may not even be a number.
    #[error("Couldn't find Order with 'id'={0}")]
    NotFound(String),

    /// One or more attributes broke a rule; nothing was stored.
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    /// The actor stopped or dropped the reply.
    #[error("{0}")]
    StoreUnavailable(String),
}

impl From<String> for OrderError {
    fn from(reason: String) -> Self {
        OrderError::StoreUnavailable(reason)
    }
}
