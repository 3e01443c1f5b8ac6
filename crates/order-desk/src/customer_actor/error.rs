//! Failures of customer operations.

use crate::model::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// No customer has the requested id. Carries the id exactly as it was asked for.
    #[error("Couldn't find Customer with 'id'={0}")]
    NotFound(String),

    /// One or more attributes broke a rule; nothing was stored.
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    /// Deletion refused because orders still reference the customer.
    #[error("That customer record could not be deleted, because the customer has orders.")]
    HasOrders,

    /// The actor stopped or dropped the reply.
    #[error("{0}")]
    StoreUnavailable(String),
}

impl From<String> for CustomerError {
    fn from(reason: String) -> Self {
        CustomerError::StoreUnavailable(reason)
    }
}
