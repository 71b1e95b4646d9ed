use crate::{error::ApiError, state::AppState};
use axum::extract::{Path, State};

#[utoipa::path(
    delete,
    path = "/api/gesture/records/{id}",
    tag = "gesture",
    params(("id" = i32, Path, description = "Prediction record id")),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 404, description = "No such record")
    )
)]
#[tracing::instrument(name = "DELETE /api/gesture/records/{id}", skip(state))]
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(), ApiError> {
    state.gestures.delete(id).await?;
    Ok(())
}
