//! Shared application state for request handlers.

use std::sync::Arc;

use crate::budget::RequestBudget;
use crate::repository::AccountRepository;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the read-only account source and the per-request processing budget.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub budget: RequestBudget,
}

impl AppState {
    /// Creates a new application state from an account source and a request budget.
    pub fn new<R>(accounts: R, budget: RequestBudget) -> Self
    where
        R: AccountRepository + 'static,
    {
        Self {
            accounts: Arc::new(accounts),
            budget,
        }
    }
}
