//! Web layer for the flight itinerary planner.
//!
//! Provides HTTP endpoints for searching itineraries and buying seats.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
