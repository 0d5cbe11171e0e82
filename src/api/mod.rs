//! HTTP surface for the leaderboard service
//!
//! Routes:
//! - `POST /customer/:customer_id/score/:delta` - apply a score delta
//! - `GET /leaderboard?start=&end=` - enumerate a rank window
//! - `GET /leaderboard/:customer_id?high=&low=` - window around a customer
//! - `GET /monitoring/health` - liveness probe
//! - `GET /monitoring/metrics` - service counters
//!
//! The core stays transport-agnostic; this module only parses parameters,
//! forwards to [`LeaderboardService`], and maps results onto status codes.

mod handlers;

use crate::core::LeaderboardService;
use crate::types::LeaderboardError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the application router over a shared service instance
pub fn router(service: Arc<LeaderboardService>) -> Router {
    Router::new()
        .route(
            "/customer/:customer_id/score/:delta",
            post(handlers::update_score),
        )
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route("/leaderboard/:customer_id", get(handlers::get_with_neighbors))
        .route("/monitoring/health", get(handlers::health))
        .route("/monitoring/metrics", get(handlers::metrics))
        .with_state(service)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Bind the given address and serve the leaderboard API until the server
/// future resolves
pub async fn serve(addr: SocketAddr, service: Arc<LeaderboardService>) -> Result<(), hyper::Error> {
    let app = router(service);

    tracing::info!("Leaderboard server listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
}

impl IntoResponse for LeaderboardError {
    /// Map service errors onto HTTP status codes
    ///
    /// Invalid arguments become 400 with the error message as the body, a
    /// missing customer becomes 404, and internal failures become a generic
    /// 500 with the detail kept to the log.
    fn into_response(self) -> Response {
        match &self {
            LeaderboardError::DeltaOutOfRange { .. }
            | LeaderboardError::InvalidRange { .. }
            | LeaderboardError::InvalidWindow { .. } => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            LeaderboardError::CustomerNotRanked { .. } => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            LeaderboardError::ArithmeticOverflow { .. } => {
                tracing::error!(error = %self, "internal error while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
