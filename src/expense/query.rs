//! Types for filtering, ordering and summarising lists of expenses.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::record::ExpenseRecord;

/// The `sort` token that selects newest-first ordering.
pub const DATE_DESC: &str = "date_desc";

/// The order to return expenses in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// The order in which the expenses were stored.
    #[default]
    Insertion,
    /// Newest date first. Ties are broken by the most recently stored first.
    DateDescending,
}

impl SortMode {
    /// Interpret a `sort` query token.
    ///
    /// Only [DATE_DESC] is recognised, anything else keeps insertion order.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(DATE_DESC) => SortMode::DateDescending,
            _ => SortMode::Insertion,
        }
    }

    /// Sort `records` in place.
    ///
    /// `records` must be in insertion order.
    pub fn apply(self, records: &mut [ExpenseRecord]) {
        if self == SortMode::DateDescending {
            records.sort_by(compare_date_descending);
        }
    }
}

fn compare_date_descending(a: &ExpenseRecord, b: &ExpenseRecord) -> Ordering {
    b.date
        .cmp(&a.date)
        .then(b.created_at.cmp(&a.created_at))
        .then(b.id.cmp(&a.id))
}

/// The query parameters for listing expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Only include expenses with exactly this category.
    pub category: Option<String>,
    /// How to order the expenses, see [SortMode::from_token].
    pub sort: Option<String>,
}

impl ListQuery {
    /// The category to filter by, if any.
    ///
    /// An empty category is treated as no filter.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
    }

    /// The requested order.
    pub fn sort_mode(&self) -> SortMode {
        SortMode::from_token(self.sort.as_deref())
    }
}

/// A list of expenses along with their aggregate total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    /// The matching expenses.
    pub expenses: Vec<ExpenseRecord>,
    /// The sum of the amounts of `expenses`.
    pub total: f64,
    /// The number of `expenses`.
    pub count: usize,
}

impl ExpenseSummary {
    /// Summarise `expenses`, keeping them in the given order.
    pub fn new(expenses: Vec<ExpenseRecord>) -> Self {
        let total = expenses
            .iter()
            .fold(0.0, |total, expense| total + expense.amount.value());
        let count = expenses.len();

        Self {
            expenses,
            total,
            count,
        }
    }
}
