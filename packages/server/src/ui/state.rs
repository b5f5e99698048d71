//! Server state shared by all handlers.

use crate::usecase::ChatContext;

/// Shared application state
pub struct AppState {
    /// Store and broadcast handles handed to every use case
    pub context: ChatContext,
}

impl AppState {
    pub fn new(context: ChatContext) -> Self {
        Self { context }
    }
}
