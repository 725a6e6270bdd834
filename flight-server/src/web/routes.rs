//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tokio::task::{JoinError, spawn_blocking};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::booking::{Booking, PurchaseError};
use crate::domain::SegmentId;
use crate::planner::{Planner, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/flights/search", get(search_flights))
        .route("/flights/:id/buy", post(buy_seats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search itineraries between two cities.
async fn search_flights(
    State(state): State<AppState>,
    query: Result<Query<SearchFlightsRequest>, QueryRejection>,
) -> Result<Json<SearchFlightsResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;
    let request = query.to_search_request()?;

    // The planner is synchronous and may run until its deadline
    let outcome = spawn_blocking(move || {
        Planner::new(state.inventory.as_ref(), &state.config).search(&request)
    })
    .await??;

    Ok(Json(SearchFlightsResponse::from_outcome(&outcome)))
}

/// Buy seats on one segment.
async fn buy_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BuyRequest>, JsonRejection>,
) -> Result<Json<ReceiptResult>, AppError> {
    let id = SegmentId::parse(&id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let Json(body) = body.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let receipt =
        spawn_blocking(move || Booking::new(state.inventory.as_ref()).buy(&id, body.quantity))
            .await??;

    Ok(Json(ReceiptResult::from_receipt(&receipt)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            SearchError::Timeout => AppError::Timeout {
                message: e.to_string(),
            },
            SearchError::Inventory(_) | SearchError::Catalogue(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<PurchaseError> for AppError {
    fn from(e: PurchaseError) -> Self {
        let message = e.to_string();
        match e {
            PurchaseError::InvalidRequest(_) => AppError::BadRequest { message },
            PurchaseError::NotFound(_) => AppError::NotFound { message },
            PurchaseError::InsufficientInventory { .. } => AppError::Conflict { message },
            PurchaseError::Inventory(_) => AppError::Internal { message },
        }
    }
}

impl From<JoinError> for AppError {
    fn from(e: JoinError) -> Self {
        AppError::Internal {
            message: format!("worker task failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
