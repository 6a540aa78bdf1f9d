//! Defines the endpoint for creating a new expense.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseForm, ExpenseRecord, NewExpense},
    ledger::{CreateOutcome, Ledger},
};

/// Whether a create request stored a new expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateStatus {
    /// The expense was stored.
    Created,
    /// The expense had already been stored by an earlier request.
    Duplicate,
}

/// The response body for a successful create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateExpenseResponse {
    /// Whether the expense is new.
    pub status: CreateStatus,
    /// The stored expense.
    pub expense: ExpenseRecord,
    /// A human readable summary of what happened.
    pub message: &'static str,
}

impl From<CreateOutcome> for CreateExpenseResponse {
    fn from(outcome: CreateOutcome) -> Self {
        match outcome {
            CreateOutcome::Created(expense) => Self {
                status: CreateStatus::Created,
                expense,
                message: "Expense created successfully.",
            },
            CreateOutcome::Duplicate(expense) => Self {
                status: CreateStatus::Duplicate,
                expense,
                message: "Duplicate expense detected. Returning existing record.",
            },
        }
    }
}

impl IntoResponse for CreateExpenseResponse {
    fn into_response(self) -> Response {
        // A retried request succeeds too, it just does not create anything.
        let status_code = match self.status {
            CreateStatus::Created => StatusCode::CREATED,
            CreateStatus::Duplicate => StatusCode::OK,
        };

        (status_code, Json(self)).into_response()
    }
}

/// A route handler for creating a new expense.
///
/// Responds with 201 Created for a new expense and 200 OK with the stored
/// record when the same expense was already created, so clients can safely
/// retry requests. Invalid input gives a 400 Bad Request naming the field.
pub async fn create_expense_endpoint(
    State(ledger): State<Arc<Ledger>>,
    payload: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<CreateExpenseResponse, Error> {
    let Json(form) =
        payload.map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))?;

    let expense = NewExpense::try_from(form)?;
    let outcome = ledger.create(expense)?;

    Ok(outcome.into())
}
