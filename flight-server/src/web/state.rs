//! Application state for the web layer.

use std::sync::Arc;

use crate::inventory::InMemoryInventory;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Flight catalogue and seat counts
    pub inventory: Arc<InMemoryInventory>,

    /// Itinerary search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(inventory: InMemoryInventory, config: SearchConfig) -> Self {
        Self {
            inventory: Arc::new(inventory),
            config: Arc::new(config),
        }
    }
}
