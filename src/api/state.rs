//! Application state for the salary benchmark API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use crate::auth::Authenticator;
use crate::store::Store;

/// Shared application state.
///
/// Holds the storage handle and the session authenticator. Both are cheap
/// to clone and share their underlying resources.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database handle.
    store: Store,
    /// Login and session tracking.
    auth: Authenticator,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: Store, auth: Authenticator) -> Self {
        Self { store, auth }
    }

    /// Returns the database handle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the authenticator.
    pub fn auth(&self) -> &Authenticator {
        &self.auth
    }
}
