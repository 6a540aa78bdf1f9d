//! Defines the endpoints for reading expenses back out of the ledger.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseSummary, ListQuery},
    ledger::Ledger,
};

/// A route handler for listing expenses.
///
/// Takes the optional query parameters `category`, which must match exactly,
/// and `sort`, where `date_desc` orders the newest expenses first.
pub async fn list_expenses_endpoint(
    State(ledger): State<Arc<Ledger>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ExpenseSummary>, Error> {
    ledger
        .list(query.category_filter(), query.sort_mode())
        .map(Json)
}

/// The response body listing the categories in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    /// The distinct categories, in the order they were first used.
    pub categories: Vec<String>,
}

/// A route handler for listing the categories that expenses have been recorded under.
pub async fn list_categories_endpoint(
    State(ledger): State<Arc<Ledger>>,
) -> Result<Json<CategoriesResponse>, Error> {
    ledger
        .categories()
        .map(|categories| Json(CategoriesResponse { categories }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Json,
        extract::{Query, State},
    };

    use crate::{
        expense::{ListQuery, NewExpense, list_categories_endpoint, list_expenses_endpoint},
        ledger::Ledger,
    };

    fn ledger_with_three_records() -> Arc<Ledger> {
        let ledger = Ledger::new();

        for (amount, category, date) in [
            ("500", "Food", "2026-01-01"),
            ("700", "Food", "2026-01-15"),
            ("200", "Travel", "2026-01-10"),
        ] {
            let expense = NewExpense::parse(amount, category, "test expense", date).unwrap();
            ledger.create(expense).unwrap();
        }

        Arc::new(ledger)
    }

    #[tokio::test]
    async fn lists_filtered_expenses_with_total() {
        let query = ListQuery {
            category: Some("Food".to_owned()),
            sort: None,
        };

        let Json(summary) = list_expenses_endpoint(State(ledger_with_three_records()), Query(query))
            .await
            .unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 1200.0);
    }

    #[tokio::test]
    async fn unknown_sort_token_keeps_insertion_order() {
        let query = ListQuery {
            category: None,
            sort: Some("amount_asc".to_owned()),
        };

        let Json(summary) = list_expenses_endpoint(State(ledger_with_three_records()), Query(query))
            .await
            .unwrap();

        let ids: Vec<i64> = summary.expenses.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn lists_categories() {
        let Json(response) = list_categories_endpoint(State(ledger_with_three_records()))
            .await
            .unwrap();

        assert_eq!(response.categories, vec!["Food", "Travel"]);
    }
}
