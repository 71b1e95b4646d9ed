use std::time::{Duration, Instant};

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/db", get(db_health))
        .route("/classifier", get(classifier_health))
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Round trip to a backing service, in milliseconds.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DependencyHealth {
    pub rtt: u128,
}

impl From<Duration> for DependencyHealth {
    fn from(elapsed: Duration) -> Self {
        Self {
            rtt: elapsed.as_millis(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
#[tracing::instrument(name = "GET /health")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health/db",
    tag = "health",
    responses(
        (status = 200, description = "Prediction history database answered", body = DependencyHealth),
        (status = 500, description = "Database unreachable")
    )
)]
#[tracing::instrument(name = "GET /health/db", skip(state))]
pub async fn db_health(State(state): State<AppState>) -> Result<Json<DependencyHealth>, ApiError> {
    let started = Instant::now();
    state.db.ping().await?;
    Ok(Json(started.elapsed().into()))
}

#[utoipa::path(
    get,
    path = "/health/classifier",
    tag = "health",
    responses(
        (status = 200, description = "Gesture classifier answered", body = DependencyHealth),
        (status = 502, description = "Gesture classifier unreachable")
    )
)]
#[tracing::instrument(name = "GET /health/classifier", skip(state))]
pub async fn classifier_health(
    State(state): State<AppState>,
) -> Result<Json<DependencyHealth>, ApiError> {
    let elapsed = state.gestures.classifier_round_trip().await?;
    Ok(Json(elapsed.into()))
}
