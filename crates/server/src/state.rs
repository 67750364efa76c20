//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::CustomerService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Built once in `main` and handed to the router.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    customers: CustomerService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(customers: CustomerService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { customers }),
        }
    }

    /// Get a reference to the customer service.
    #[must_use]
    pub fn customers(&self) -> &CustomerService {
        &self.inner.customers
    }
}
