use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod delete_record;
pub mod get_by_confidence;
pub mod get_by_label;
pub mod get_recent;
pub mod get_record;
pub mod predict;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict::predict))
        .route("/recent", get(get_recent::get_recent))
        .route("/by-label", get(get_by_label::get_by_label))
        .route("/by-confidence", get(get_by_confidence::get_by_confidence))
        .route(
            "/records/{id}",
            get(get_record::get_record).delete(delete_record::delete_record),
        )
}
