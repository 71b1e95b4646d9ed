use crate::{error::ApiError, gesture::PredictionSummary, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Clone, Deserialize, Debug, IntoParams)]
pub struct LabelQuery {
    /// Exact, case-sensitive match.
    pub label: String,
}

#[utoipa::path(
    get,
    path = "/api/gesture/by-label",
    tag = "gesture",
    params(LabelQuery),
    responses(
        (status = 200, description = "Predictions with this label", body = Vec<PredictionSummary>)
    )
)]
#[tracing::instrument(name = "GET /api/gesture/by-label", skip(state))]
pub async fn get_by_label(
    State(state): State<AppState>,
    Query(query): Query<LabelQuery>,
) -> Result<Json<Vec<PredictionSummary>>, ApiError> {
    let predictions = state.gestures.by_label(&query.label).await?;
    Ok(Json(predictions))
}
