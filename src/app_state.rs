//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::ledger::Ledger;

/// The state of the REST server.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The ledger holding every expense recorded since the server started.
    pub ledger: Arc<Ledger>,
}

impl AppState {
    /// Create a new [AppState] around `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(ledger),
        }
    }
}

// this impl lets the expense handlers extract just the ledger from our state
impl FromRef<AppState> for Arc<Ledger> {
    fn from_ref(state: &AppState) -> Self {
        state.ledger.clone()
    }
}
