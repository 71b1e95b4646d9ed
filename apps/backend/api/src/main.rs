#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use axum::{Router, routing::get};
use signlearn_api::{construct_router, state::State};
use std::sync::Arc;

mod config;
mod telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    telemetry::init_telemetry()?;

    tracing::info!("Starting SignLearn API Service");

    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: port={}, inference={}",
        config.port,
        config.inference.base_url
    );

    let state = Arc::new(State::connect(&config.database, &config.inference).await?);

    let app = Router::new()
        .merge(construct_router(state))
        .route("/metrics", get(telemetry::handler));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
