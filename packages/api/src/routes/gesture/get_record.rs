use crate::{error::ApiError, gesture::PredictionRecordView, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/api/gesture/records/{id}",
    tag = "gesture",
    params(("id" = i32, Path, description = "Prediction record id")),
    responses(
        (status = 200, description = "Stored prediction with its landmarks", body = PredictionRecordView),
        (status = 404, description = "No such record")
    )
)]
#[tracing::instrument(name = "GET /api/gesture/records/{id}", skip(state))]
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PredictionRecordView>, ApiError> {
    let record = state.gestures.get(id).await?;
    Ok(Json(record))
}
