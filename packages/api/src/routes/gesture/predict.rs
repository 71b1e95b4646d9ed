use crate::{
    error::ApiError,
    gesture::{GestureInput, PredictionResult},
    state::AppState,
};
use axum::{Json, extract::State};

#[utoipa::path(
    post,
    path = "/api/gesture/predict",
    tag = "gesture",
    request_body = GestureInput,
    responses(
        (status = 200, description = "Classifier result, as returned by the classifier", body = PredictionResult),
        (status = 400, description = "Wrong number of hands or landmarks"),
        (status = 502, description = "Classifier unavailable, nothing stored")
    )
)]
#[tracing::instrument(name = "POST /api/gesture/predict", skip(state, input))]
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<GestureInput>,
) -> Result<Json<PredictionResult>, ApiError> {
    // Detached so a client disconnect cannot abort the call between
    // classification and the history write.
    let task = tokio::spawn(async move { state.gestures.predict(&input).await });

    let result = task
        .await
        .map_err(|err| ApiError::internal(format!("prediction task failed: {}", err)))??;

    Ok(Json(result))
}
