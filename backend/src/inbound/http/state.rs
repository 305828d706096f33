//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the registry port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserRegistry;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRegistry>,
}

impl HttpState {
    /// Construct state from a registry implementation.
    pub fn new(users: Arc<dyn UserRegistry>) -> Self {
        Self { users }
    }
}
