//! Derives the idempotency key used to detect retried expense creation.

use std::fmt::Display;

use sha2::{Digest, Sha256};

use super::record::NewExpense;

/// A hash of the business fields of an expense.
///
/// Two expenses with the same amount, category, description and date have the
/// same fingerprint, so a create request that is retried after a network
/// failure can be matched to the record the first attempt stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a validated expense.
    ///
    /// The fields are combined in the fixed order amount, category,
    /// description, date. Each field is prefixed with its length in bytes so
    /// that text containing the separator cannot shift a field boundary. The
    /// amount uses its canonical text form so that `1500` and `1500.00` match.
    /// Text fields are already trimmed but are not case-folded.
    pub fn of(expense: &NewExpense) -> Self {
        let amount = expense.amount.canonical();
        let date = expense.date.to_string();
        let fields: [&str; 4] = [
            &amount,
            expense.category.as_ref(),
            expense.description.as_ref(),
            &date,
        ];

        let mut hasher = Sha256::new();

        for field in fields {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field);
            hasher.update(b"|");
        }

        let hex = hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();

        Self(hex)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
