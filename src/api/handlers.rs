//! Request handlers for the leaderboard API

use crate::core::LeaderboardService;
use crate::types::{CustomerId, LeaderboardError, ServiceMetrics};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for `GET /leaderboard`
#[derive(Debug, Deserialize)]
pub(crate) struct RangeParams {
    start: i64,
    end: i64,
}

/// Query parameters for `GET /leaderboard/:customer_id`; both extents
/// default to zero
#[derive(Debug, Deserialize)]
pub(crate) struct WindowParams {
    #[serde(default)]
    high: i64,
    #[serde(default)]
    low: i64,
}

/// Metrics payload: the service counters plus a response timestamp
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricsResponse {
    #[serde(flatten)]
    metrics: ServiceMetrics,
    timestamp: DateTime<Utc>,
}

/// `POST /customer/:customer_id/score/:delta`
///
/// The new total score is returned as a plain decimal-string body.
pub(crate) async fn update_score(
    State(service): State<Arc<LeaderboardService>>,
    Path((customer_id, delta)): Path<(CustomerId, String)>,
) -> Response {
    let delta = match delta.parse::<Decimal>() {
        Ok(delta) => delta,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid decimal delta '{}'", delta),
            )
                .into_response()
        }
    };

    match service.update_score(customer_id, delta) {
        Ok(score) => (StatusCode::OK, score.to_string()).into_response(),
        Err(error) => error.into_response(),
    }
}

/// `GET /leaderboard?start=&end=`
pub(crate) async fn get_leaderboard(
    State(service): State<Arc<LeaderboardService>>,
    Query(params): Query<RangeParams>,
) -> Response {
    match service.leaderboard(params.start, params.end) {
        Ok(rankings) => Json(rankings).into_response(),
        Err(error) => error.into_response(),
    }
}

/// `GET /leaderboard/:customer_id?high=&low=`
///
/// An indexed customer's window always contains at least the customer
/// itself, so an empty result means the customer is not ranked: 404.
pub(crate) async fn get_with_neighbors(
    State(service): State<Arc<LeaderboardService>>,
    Path(customer_id): Path<CustomerId>,
    Query(params): Query<WindowParams>,
) -> Response {
    match service.neighborhood(customer_id, params.high, params.low) {
        Ok(rankings) if rankings.is_empty() => {
            LeaderboardError::customer_not_ranked(customer_id).into_response()
        }
        Ok(rankings) => Json(rankings).into_response(),
        Err(error) => error.into_response(),
    }
}

/// `GET /monitoring/health`
pub(crate) async fn health() -> &'static str {
    "Healthy"
}

/// `GET /monitoring/metrics`
pub(crate) async fn metrics(
    State(service): State<Arc<LeaderboardService>>,
) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: service.metrics(),
        timestamp: Utc::now(),
    })
}
