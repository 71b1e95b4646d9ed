use crate::{error::ApiError, gesture::PredictionSummary, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Clone, Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceQuery {
    /// Exclusive lower bound.
    pub min_confidence: f64,
}

#[utoipa::path(
    get,
    path = "/api/gesture/by-confidence",
    tag = "gesture",
    params(ConfidenceQuery),
    responses(
        (status = 200, description = "Predictions with confidence strictly above the threshold", body = Vec<PredictionSummary>)
    )
)]
#[tracing::instrument(name = "GET /api/gesture/by-confidence", skip(state))]
pub async fn get_by_confidence(
    State(state): State<AppState>,
    Query(query): Query<ConfidenceQuery>,
) -> Result<Json<Vec<PredictionSummary>>, ApiError> {
    let predictions = state.gestures.by_min_confidence(query.min_confidence).await?;
    Ok(Json(predictions))
}
