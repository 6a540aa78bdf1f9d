//! The API endpoints URIs.

/// The route to create and list expenses.
pub const EXPENSES: &str = "/expenses";
/// The route to list the categories in use.
pub const CATEGORIES: &str = "/categories";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";

// Every route must parse as a URI for the router to accept it.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::HEALTH);
    }
}
