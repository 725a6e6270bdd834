use std::error::Error;
use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use flight_server::inventory::InMemoryInventory;
use flight_server::planner::SearchConfig;
use flight_server::web::{AppState, create_router};

/// Listen address when `FLIGHT_SERVER_ADDR` is unset.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("FLIGHT_SERVER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    // Load the catalogue, or start empty
    let inventory = match std::env::var("FLIGHT_CATALOGUE") {
        Ok(path) => InMemoryInventory::from_json_file(&path)?,
        Err(_) => {
            warn!("FLIGHT_CATALOGUE not set, starting with an empty catalogue");
            InMemoryInventory::new()
        }
    };

    let mut search_config = SearchConfig::default();
    if let Ok(secs) = std::env::var("SEARCH_DEADLINE_SECS") {
        search_config.deadline_secs = secs.trim().parse()?;
    }

    let state = AppState::new(inventory, search_config);
    let app = create_router(state);

    info!(%addr, "flight itinerary planner listening");
    info!("GET  /health            - Health check");
    info!("GET  /flights/search    - Search itineraries");
    info!("POST /flights/:id/buy   - Buy seats");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
