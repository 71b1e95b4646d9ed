#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use signlearn_api::{
    entity::ensure_schema,
    gesture::{
        GestureInput, GestureService, HandLandmarks, LANDMARKS_PER_HAND, Landmark,
        PredictionResult, PredictionStatus, PredictionStore,
    },
    inference::{Classifier, InferenceUnavailable},
    sea_orm::{ConnectOptions, Database, DatabaseConnection},
};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // A single connection, otherwise every pooled connection sees its own empty database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    ensure_schema(&db).await.unwrap();
    db
}

pub fn hand(offset: f64) -> HandLandmarks {
    (0..LANDMARKS_PER_HAND)
        .map(|i| {
            let i = i as f64;
            Landmark::new(0.5 + 0.01 * i + offset, 0.4 - 0.015 * i, -0.002 * i)
        })
        .collect::<Vec<_>>()
        .into()
}

pub fn one_hand() -> GestureInput {
    GestureInput::new(vec![hand(0.0)])
}

pub fn result(predicted_class: u32, confidence: f64, label: &str) -> PredictionResult {
    PredictionResult {
        status: PredictionStatus::Success,
        predicted_class,
        confidence,
        probabilities: vec![1.0 - confidence, confidence],
        label: label.to_string(),
    }
}

/// Answers every call with the queued result, or fails when none is set.
pub struct StubClassifier {
    response: Option<PredictionResult>,
    calls: AtomicUsize,
}

impl StubClassifier {
    pub fn answering(result: PredictionResult) -> Arc<Self> {
        Arc::new(Self {
            response: Some(result),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Classifier for StubClassifier {
    async fn classify(
        &self,
        _input: &GestureInput,
    ) -> Result<PredictionResult, InferenceUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .ok_or_else(|| InferenceUnavailable::new("connection refused"))
    }

    async fn ping(&self) -> Result<Duration, InferenceUnavailable> {
        match self.response {
            Some(_) => Ok(Duration::from_millis(3)),
            None => Err(InferenceUnavailable::new("connection refused")),
        }
    }
}

pub async fn service_with(classifier: Arc<StubClassifier>) -> GestureService {
    GestureService::new(PredictionStore::new(memory_db().await), classifier)
}
