use std::time::Duration;

use sea_orm::DbErr;

use super::error::{GestureError, PredictionFailure};
use super::landmarks::GestureInput;
use super::prediction::{PredictionRecordView, PredictionResult, PredictionSummary};
use super::store::{NewPrediction, PredictionStore};
use crate::inference::DynClassifier;

/// Ties the classifier and the prediction history together.
///
/// A record is written if and only if the input encoded cleanly and the
/// classifier answered. Nothing here retries.
pub struct GestureService {
    store: PredictionStore,
    classifier: DynClassifier,
}

impl GestureService {
    pub fn new(store: PredictionStore, classifier: DynClassifier) -> Self {
        Self { store, classifier }
    }

    pub fn store(&self) -> &PredictionStore {
        &self.store
    }

    pub async fn classifier_round_trip(&self) -> Result<Duration, GestureError> {
        self.classifier.ping().await.map_err(|err| {
            tracing::warn!("Classifier health check failed: {}", err);
            GestureError::from(err)
        })
    }

    #[tracing::instrument(name = "gesture.predict", skip(self, input), fields(hands = input.hand_count()))]
    pub async fn predict(&self, input: &GestureInput) -> Result<PredictionResult, GestureError> {
        if let Err(err) = input.validate() {
            tracing::warn!("Rejected gesture input: {}", err);
            count_prediction("invalid");
            return Err(GestureError::InvalidInput(err));
        }

        let landmark_data = input.to_landmark_data().map_err(|err| {
            tracing::error!("Failed to encode landmarks: {}", err);
            count_prediction("failed");
            GestureError::PredictionFailed(PredictionFailure::Encoding(err))
        })?;

        let result = self.classifier.classify(input).await.map_err(|err| {
            tracing::error!("Classification failed, nothing persisted: {}", err);
            count_prediction("failed");
            GestureError::from(err)
        })?;

        if !(0.0..=1.0).contains(&result.confidence) {
            tracing::warn!(
                confidence = result.confidence,
                "Classifier confidence outside [0, 1], storing as reported"
            );
        }

        let record = self
            .store
            .insert(NewPrediction {
                predicted_class: result.predicted_class,
                confidence: result.confidence,
                label: result.label.clone(),
                landmark_data,
            })
            .await
            .map_err(|err| {
                count_prediction("failed");
                persistence_failed("predict", err)
            })?;

        count_prediction("stored");
        tracing::info!(
            id = record.id,
            status = ?result.status,
            "Prediction saved: {}",
            record.gesture_label
        );

        Ok(result)
    }

    #[tracing::instrument(name = "gesture.recent", skip(self))]
    pub async fn recent(&self, limit: u64) -> Result<Vec<PredictionSummary>, GestureError> {
        let records = self
            .store
            .recent(limit)
            .await
            .map_err(|err| persistence_failed("recent", err))?;

        Ok(records.into_iter().map(PredictionSummary::from).collect())
    }

    #[tracing::instrument(name = "gesture.by_label", skip(self))]
    pub async fn by_label(&self, label: &str) -> Result<Vec<PredictionSummary>, GestureError> {
        let records = self
            .store
            .by_label(label)
            .await
            .map_err(|err| persistence_failed("by_label", err))?;

        Ok(records.into_iter().map(PredictionSummary::from).collect())
    }

    #[tracing::instrument(name = "gesture.by_min_confidence", skip(self))]
    pub async fn by_min_confidence(
        &self,
        threshold: f64,
    ) -> Result<Vec<PredictionSummary>, GestureError> {
        let records = self
            .store
            .by_min_confidence(threshold)
            .await
            .map_err(|err| persistence_failed("by_min_confidence", err))?;

        Ok(records.into_iter().map(PredictionSummary::from).collect())
    }

    #[tracing::instrument(name = "gesture.get", skip(self))]
    pub async fn get(&self, id: i32) -> Result<PredictionRecordView, GestureError> {
        let record = self
            .store
            .find(id)
            .await
            .map_err(|err| persistence_failed("get", err))?
            .ok_or_else(|| {
                tracing::warn!("Prediction record not found");
                GestureError::NotFound(id)
            })?;

        let input = GestureInput::from_landmark_data(&record.landmark_data).map_err(|err| {
            persistence_failed(
                "get",
                DbErr::Json(format!("landmark_data of record {}: {}", id, err)),
            )
        })?;

        Ok(PredictionRecordView {
            id: record.id,
            predicted_class: record.class_index(),
            confidence: record.confidence,
            label: record.gesture_label,
            landmarks: input.landmarks,
            created_at: record.created_at,
        })
    }

    #[tracing::instrument(name = "gesture.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), GestureError> {
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|err| persistence_failed("delete", err))?;

        if !deleted {
            tracing::warn!("Prediction record not found");
            return Err(GestureError::NotFound(id));
        }

        tracing::info!("Prediction record deleted");
        Ok(())
    }
}

fn persistence_failed(operation: &'static str, err: DbErr) -> GestureError {
    tracing::error!(operation, "Prediction store error: {}", err);
    GestureError::PersistenceFailed(err)
}

fn count_prediction(outcome: &'static str) {
    metrics::counter!("predictions_total", "outcome" => outcome).increment(1);
}
