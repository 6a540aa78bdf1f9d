//! Application router configuration.

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState, endpoints,
    expense::{create_expense_endpoint, list_categories_endpoint, list_expenses_endpoint},
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES,
            post(create_expense_endpoint).get(list_expenses_endpoint),
        )
        .route(endpoints::CATEGORIES, get(list_categories_endpoint))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Expense ledger API is running",
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, endpoints, expense::MAX_AMOUNT};

    fn get_test_server() -> TestServer {
        TestServer::try_new(build_router(AppState::default())).expect("Could not create test server.")
    }

    fn lunch() -> Value {
        json!({
            "amount": 1500,
            "category": "Food",
            "description": "Lunch at restaurant",
            "date": "2026-01-21",
        })
    }

    #[tokio::test]
    async fn create_then_retry_returns_same_expense() {
        let server = get_test_server();

        let first = server.post(endpoints::EXPENSES).json(&lunch()).await;
        first.assert_status(StatusCode::CREATED);
        let first = first.json::<Value>();
        assert_eq!(first["status"], "created");

        let second = server.post(endpoints::EXPENSES).json(&lunch()).await;
        second.assert_status_ok();
        let second = second.json::<Value>();
        assert_eq!(second["status"], "duplicate");

        assert_eq!(first["expense"]["id"], second["expense"]["id"]);
        assert_eq!(first["expense"]["created_at"], second["expense"]["created_at"]);

        let list = server.get(endpoints::EXPENSES).await.json::<Value>();
        assert_eq!(list["count"], 1);
    }

    #[tokio::test]
    async fn create_returns_full_record() {
        let server = get_test_server();

        let response = server.post(endpoints::EXPENSES).json(&lunch()).await;

        let expense = &response.json::<Value>()["expense"];
        assert_eq!(expense["id"], 1);
        assert_eq!(expense["amount"], 1500.0);
        assert_eq!(expense["category"], "Food");
        assert_eq!(expense["description"], "Lunch at restaurant");
        assert_eq!(expense["date"], "2026-01-21");
        assert!(expense["created_at"].is_string());
        assert!(expense.get("fingerprint").is_none());
    }

    #[tokio::test]
    async fn invalid_fields_are_bad_requests() {
        let server = get_test_server();

        let cases = [
            (json!({"amount": -5}), "amount"),
            (json!({"amount": 0}), "amount"),
            (json!({"amount": "abc"}), "amount"),
            (json!({"category": "  "}), "category"),
            (json!({"description": ""}), "description"),
            (json!({"date": "21/01/2026"}), "date"),
            (json!({"date": "2026-02-30"}), "date"),
        ];

        for (patch, field) in cases {
            let mut body = lunch();
            for (key, value) in patch.as_object().unwrap() {
                body[key] = value.clone();
            }

            let response = server.post(endpoints::EXPENSES).json(&body).await;

            response.assert_status_bad_request();
            assert_eq!(response.json::<Value>()["field"], field, "{body}");
        }

        let list = server.get(endpoints::EXPENSES).await.json::<Value>();
        assert_eq!(list["count"], 0);
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({"amount": 10, "category": "Food", "description": "Snack"}))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["field"], "date");
        assert_eq!(body["error"], "date is required");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({"amount": 10, "category": 42}))
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn list_filters_sorts_and_totals() {
        let server = get_test_server();

        for (amount, category, date) in [
            (500, "Food", "2026-01-01"),
            (700, "Food", "2026-01-15"),
            (200, "Travel", "2026-01-10"),
        ] {
            server
                .post(endpoints::EXPENSES)
                .json(&json!({
                    "amount": amount,
                    "category": category,
                    "description": "test expense",
                    "date": date,
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let food = server
            .get(endpoints::EXPENSES)
            .add_query_param("category", "Food")
            .await
            .json::<Value>();
        assert_eq!(food["count"], 2);
        assert_eq!(food["total"], 1200.0);

        let sorted = server
            .get(endpoints::EXPENSES)
            .add_query_param("sort", "date_desc")
            .await
            .json::<Value>();
        let dates: Vec<&str> = sorted["expenses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|expense| expense["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2026-01-15", "2026-01-10", "2026-01-01"]);
        assert_eq!(sorted["total"], 1400.0);

        let none = server
            .get(endpoints::EXPENSES)
            .add_query_param("category", "Rent")
            .await
            .json::<Value>();
        assert_eq!(none, json!({"expenses": [], "total": 0.0, "count": 0}));

        let categories = server.get(endpoints::CATEGORIES).await.json::<Value>();
        assert_eq!(categories, json!({"categories": ["Food", "Travel"]}));
    }

    #[tokio::test]
    async fn huge_amounts_are_rejected_so_total_stays_a_number() {
        let server = get_test_server();

        for category in ["A", "B"] {
            let response = server
                .post(endpoints::EXPENSES)
                .json(&json!({
                    "amount": 1e308,
                    "category": category,
                    "description": "huge",
                    "date": "2026-01-21",
                }))
                .await;

            response.assert_status_bad_request();
            assert_eq!(response.json::<Value>()["field"], "amount");
        }

        for category in ["A", "B"] {
            server
                .post(endpoints::EXPENSES)
                .json(&json!({
                    "amount": MAX_AMOUNT,
                    "category": category,
                    "description": "largest allowed",
                    "date": "2026-01-21",
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let list = server.get(endpoints::EXPENSES).await.json::<Value>();
        assert_eq!(list["count"], 2);
        assert_eq!(list["total"].as_f64(), Some(MAX_AMOUNT * 2.0));
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/nope")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
