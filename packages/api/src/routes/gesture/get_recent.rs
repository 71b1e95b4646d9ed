use crate::{
    error::ApiError,
    gesture::{PredictionSummary, RECENT_WINDOW},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Clone, Deserialize, Debug, IntoParams)]
pub struct RecentQuery {
    /// Defaults to, and is capped at, 10.
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/gesture/recent",
    tag = "gesture",
    params(RecentQuery),
    responses(
        (status = 200, description = "Most recent predictions, newest first", body = Vec<PredictionSummary>)
    )
)]
#[tracing::instrument(name = "GET /api/gesture/recent", skip(state))]
pub async fn get_recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<PredictionSummary>>, ApiError> {
    let limit = query.limit.unwrap_or(RECENT_WINDOW);
    let predictions = state.gestures.recent(limit).await?;
    Ok(Json(predictions))
}
