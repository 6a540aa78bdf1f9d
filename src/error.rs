//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::expense::ValidationError;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field of a new expense failed validation.
    ///
    /// Validation happens before the ledger is touched, so the ledger is
    /// unchanged when this error is returned.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body could not be parsed as an expense.
    ///
    /// Holds the rejection message from the JSON extractor, e.g. when the body
    /// is not JSON or a field has the wrong type.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The lock guarding the ledger was poisoned by a panicking thread.
    ///
    /// This is not shown to the client, it should only be logged on the server.
    #[error("could not acquire the ledger lock")]
    LockPoisoned,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(error) => {
                tracing::warn!("rejected expense: {error}");

                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": error.to_string(),
                        "field": error.field,
                    })),
                )
                    .into_response()
            }
            Error::InvalidRequestBody(message) => {
                tracing::warn!("rejected request body: {message}");

                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("invalid request body: {message}") })),
                )
                    .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response()
            }
        }
    }
}
