//! Validated field types for expenses.
//!
//! Each type can only be constructed from input that passed validation, so an
//! [crate::expense::ExpenseRecord] built from them is always well-formed.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The `YYYY-MM-DD` format used for expense dates on the wire.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The input fields of an expense, used to say which field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseField {
    /// The amount of money spent.
    Amount,
    /// The category label.
    Category,
    /// The text description.
    Description,
    /// The date the money was spent.
    Date,
}

impl Display for ExpenseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpenseField::Amount => "amount",
            ExpenseField::Category => "category",
            ExpenseField::Description => "description",
            ExpenseField::Date => "date",
        };

        write!(f, "{name}")
    }
}

/// A field of a new expense was missing or malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason}")]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: ExpenseField,
    /// A message for the client explaining how to fix the input.
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: ExpenseField, reason: &str) -> Self {
        Self {
            field,
            reason: reason.to_owned(),
        }
    }

    /// Create the error for a field that was not in the request.
    pub fn missing(field: ExpenseField) -> Self {
        Self {
            field,
            reason: format!("{field} is required"),
        }
    }
}

/// The largest amount a single expense may have.
///
/// Keeps the sum over any number of expenses the ledger could hold finite.
pub const MAX_AMOUNT: f64 = 1e15;

/// A positive, finite amount of money, at most [MAX_AMOUNT].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] for [ExpenseField::Amount] if `value` is
    /// zero, negative, NaN, infinite or greater than [MAX_AMOUNT].
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new(
                ExpenseField::Amount,
                "amount must be a valid number",
            ));
        }

        if value <= 0.0 {
            return Err(ValidationError::new(
                ExpenseField::Amount,
                "amount must be greater than 0",
            ));
        }

        if value > MAX_AMOUNT {
            return Err(ValidationError::new(
                ExpenseField::Amount,
                &format!("amount must be at most {MAX_AMOUNT}"),
            ));
        }

        Ok(Self(value))
    }

    /// The amount as a plain number.
    pub fn value(self) -> f64 {
        self.0
    }

    /// The canonical text form of the amount.
    ///
    /// Numerically equal amounts always produce the same text, e.g. `1500`,
    /// `1500.0` and `1500.00` all become `"1500"`.
    pub fn canonical(self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<f64> for Amount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|_| {
            ValidationError::new(ExpenseField::Amount, "amount must be a valid number")
        })?;

        Amount::new(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim `text` and check that something is left over.
fn non_empty(text: &str, field: ExpenseField) -> Result<String, ValidationError> {
    let text = text.trim();

    if text.is_empty() {
        Err(ValidationError::new(
            field,
            &format!("{field} cannot be empty"),
        ))
    } else {
        Ok(text.to_owned())
    }
}

/// A free-form, non-empty category label such as "Food" or "Travel".
///
/// Surrounding whitespace is removed, but the case is kept as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] for [ExpenseField::Category] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        non_empty(name, ExpenseField::Category).map(Self)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::new(&value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-empty text description of what the money was spent on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a description.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] for [ExpenseField::Description] if `text`
    /// is empty or only whitespace.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        non_empty(text, ExpenseField::Description).map(Self)
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Description::new(&value)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> Self {
        description.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The calendar date of an expense, written as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseDate(Date);

impl ExpenseDate {
    /// Wrap an already valid date.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// The underlying date.
    pub fn date(self) -> Date {
        self.0
    }
}

/// Whether `text` has the exact shape `DDDD-DD-DD`.
///
/// The date parser alone would also accept signed years, so the shape is
/// checked first.
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, byte)| match i {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl FromStr for ExpenseDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if !has_date_shape(s) {
            return Err(ValidationError::new(
                ExpenseField::Date,
                "date must be in the format YYYY-MM-DD",
            ));
        }

        Date::parse(s, DATE_FORMAT).map(Self).map_err(|_| {
            ValidationError::new(
                ExpenseField::Date,
                &format!("{s} is not a valid calendar date"),
            )
        })
    }
}

impl TryFrom<String> for ExpenseDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpenseDate> for String {
    fn from(date: ExpenseDate) -> Self {
        date.to_string()
    }
}

impl Display for ExpenseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.0.format(DATE_FORMAT).map_err(|_| std::fmt::Error)?;

        write!(f, "{text}")
    }
}
