use std::{sync::Arc, time::Duration};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;

use crate::entity::ensure_schema;
use crate::gesture::{GestureService, PredictionStore};
use crate::inference::{DynClassifier, HttpClassifier, InferenceConfig};

pub type AppState = Arc<State>;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub sqlx_logging: bool,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("database setup failed: {0}")]
    Database(#[from] DbErr),
    #[error("inference client setup failed: {0}")]
    Inference(#[from] reqwest::Error),
}

pub struct State {
    pub db: DatabaseConnection,
    pub gestures: GestureService,
}

impl State {
    pub fn new(db: DatabaseConnection, classifier: DynClassifier) -> Self {
        let store = PredictionStore::new(db.clone());
        Self::with_store(db, store, classifier)
    }

    pub fn with_store(
        db: DatabaseConnection,
        store: PredictionStore,
        classifier: DynClassifier,
    ) -> Self {
        Self {
            db,
            gestures: GestureService::new(store, classifier),
        }
    }

    /// Connects to the database, creates missing tables and builds the HTTP
    /// classifier from `inference`.
    pub async fn connect(
        database: &DatabaseConfig,
        inference: &InferenceConfig,
    ) -> Result<Self, StateError> {
        let mut opt = ConnectOptions::new(database.url.to_owned());
        opt.max_connections(database.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(database.sqlx_logging);

        let db = Database::connect(opt).await?;
        ensure_schema(&db).await?;
        let store = PredictionStore::open(db.clone()).await?;

        let classifier = HttpClassifier::new(inference)?;
        tracing::info!(
            "Inference client ready: endpoint={}, timeout={:?}, retry={}",
            classifier.endpoint(),
            inference.timeout,
            inference.retry_transport_errors
        );

        Ok(Self::with_store(db, store, Arc::new(classifier)))
    }
}
