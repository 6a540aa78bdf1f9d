//! Defines the core data models for expenses and the validation of new expenses.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{
    domain::{Amount, Category, Description, ExpenseDate, ExpenseField, ValidationError},
    fingerprint::Fingerprint,
};

// ============================================================================
// MODELS
// ============================================================================

/// Identifier for an expense record.
///
/// IDs are handed out in increasing order, so they also give the order in
/// which records were inserted.
pub type ExpenseId = i64;

/// A stored expense, i.e. an event where money was spent.
///
/// Records are created by [crate::Ledger::create] and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The amount of money spent.
    pub amount: Amount,
    /// The category the expense belongs to, e.g. "Food".
    pub category: Category,
    /// A text description of what the money was spent on.
    pub description: Description,
    /// When the money was spent.
    pub date: ExpenseDate,
    /// When the ledger stored the record.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The idempotency key of the record.
    #[serde(skip)]
    pub fingerprint: Fingerprint,
}

impl ExpenseRecord {
    /// Finalise a validated expense into a record.
    ///
    /// `fingerprint` must be [Fingerprint::of] `expense`.
    pub fn new(
        id: ExpenseId,
        expense: NewExpense,
        fingerprint: Fingerprint,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date,
            created_at,
            fingerprint,
        }
    }
}

/// The validated fields of an expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The amount of money spent.
    pub amount: Amount,
    /// The category the expense belongs to.
    pub category: Category,
    /// A text description of what the money was spent on.
    pub description: Description,
    /// When the money was spent.
    pub date: ExpenseDate,
}

impl NewExpense {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] for the first invalid field, checked in the
    /// order amount, category, description, date.
    pub fn parse(
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: amount.parse()?,
            category: Category::new(category)?,
            description: Description::new(description)?,
            date: date.parse()?,
        })
    }
}

// ============================================================================
// REQUEST PAYLOAD
// ============================================================================

/// An amount as sent by a client, either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(f64),
    /// A JSON string holding a number, e.g. `"12.50"`.
    Text(String),
}

impl TryFrom<AmountInput> for Amount {
    type Error = ValidationError;

    fn try_from(input: AmountInput) -> Result<Self, Self::Error> {
        match input {
            AmountInput::Number(value) => Amount::new(value),
            AmountInput::Text(text) => text.parse(),
        }
    }
}

/// The request body for creating an expense.
///
/// Every field is optional here so that a missing field is reported as a
/// validation error for that field rather than a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// The amount of money spent.
    #[serde(default)]
    pub amount: Option<AmountInput>,
    /// The category label.
    #[serde(default)]
    pub category: Option<String>,
    /// What the money was spent on.
    #[serde(default)]
    pub description: Option<String>,
    /// The date in `YYYY-MM-DD` format.
    #[serde(default)]
    pub date: Option<String>,
}

impl TryFrom<ExpenseForm> for NewExpense {
    type Error = ValidationError;

    fn try_from(form: ExpenseForm) -> Result<Self, Self::Error> {
        let amount: Amount = form
            .amount
            .ok_or_else(|| ValidationError::missing(ExpenseField::Amount))?
            .try_into()?;
        let category = form
            .category
            .ok_or_else(|| ValidationError::missing(ExpenseField::Category))?;
        let category = Category::new(&category)?;
        let description = form
            .description
            .ok_or_else(|| ValidationError::missing(ExpenseField::Description))?;
        let description = Description::new(&description)?;
        let date: ExpenseDate = form
            .date
            .ok_or_else(|| ValidationError::missing(ExpenseField::Date))?
            .parse()?;

        Ok(Self {
            amount,
            category,
            description,
            date,
        })
    }
}
