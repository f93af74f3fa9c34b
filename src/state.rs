//! Application state
//!
//! Everything a handler needs, cloned cheaply into each request.

use crate::notifier::Notifier;
use crate::store::Store;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Submission database
    pub store: Store,
    /// Outbound notifications
    pub notifier: Notifier,
}

impl AppState {
    /// Bundle a store and a notifier
    pub fn new(store: Store, notifier: Notifier) -> Self {
        Self { store, notifier }
    }
}
