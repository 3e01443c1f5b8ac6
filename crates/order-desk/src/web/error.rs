use crate::customer_actor::CustomerError;
use crate::order_actor::OrderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures a handler cannot recover from.
///
/// Missing records, validation failures and refused deletions are not here; controllers
/// turn those into ordinary outcomes.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    BadRequest(String),

    #[error("store failure: {0}")]
    Store(String),
}

impl From<OrderError> for WebError {
    fn from(e: OrderError) -> Self {
        WebError::Store(e.to_string())
    }
}

impl From<CustomerError> for WebError {
    fn from(e: CustomerError) -> Self {
        WebError::Store(e.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::BadRequest(message) => {
                tracing::warn!(%message, "Bad request");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            WebError::Store(message) => {
                tracing::error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
