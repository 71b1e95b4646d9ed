use axum::{Json, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use utoipa::OpenApi;

use state::AppState;

mod routes;

pub mod entity;
pub mod error;
pub mod gesture;
pub mod inference;
pub mod openapi;
pub mod state;

pub use axum;
pub use sea_orm;

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/gesture", routes::gesture::routes())
        .nest("/health", routes::health::routes())
        .with_state(state)
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}
