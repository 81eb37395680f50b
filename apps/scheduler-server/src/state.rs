//! Application state.

use std::sync::Arc;

use appointment_store::{SchedulingBackend, SchedulingStore};

use crate::config::Config;

/// Shared application state.
pub struct AppState<B: SchedulingBackend> {
    /// Server configuration.
    pub config: Config,
    /// Appointment store.
    pub store: SchedulingStore<B>,
}

impl<B: SchedulingBackend> AppState<B> {
    /// Creates new application state.
    pub fn new(config: Config, store: SchedulingStore<B>) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<B> = Arc<AppState<B>>;

/// Creates shared state from config and store.
pub fn create_shared_state<B: SchedulingBackend>(
    config: Config,
    store: SchedulingStore<B>,
) -> SharedState<B> {
    Arc::new(AppState::new(config, store))
}
