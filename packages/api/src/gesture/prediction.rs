use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::gesture_record;

use super::landmarks::HandLandmarks;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Success,
    Error,
    NoHandDetected,
}

/// Classifier output, returned unchanged to the caller of `predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub status: PredictionStatus,
    pub predicted_class: u32,
    pub confidence: f64,
    #[serde(default)]
    pub probabilities: Vec<f64>,
    #[serde(rename = "gestureLabel", alias = "label", default)]
    pub label: String,
}

/// History listing entry. Probabilities and geometry are not replayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSummary {
    pub id: i32,
    pub predicted_class: u32,
    pub confidence: f64,
    #[serde(rename = "gestureLabel")]
    pub label: String,
}

/// A single stored record with its decoded landmarks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecordView {
    pub id: i32,
    pub predicted_class: u32,
    pub confidence: f64,
    #[serde(rename = "gestureLabel")]
    pub label: String,
    pub landmarks: Vec<HandLandmarks>,
    pub created_at: DateTime<Utc>,
}

impl From<&gesture_record::Model> for PredictionSummary {
    fn from(record: &gesture_record::Model) -> Self {
        Self {
            id: record.id,
            predicted_class: record.class_index(),
            confidence: record.confidence,
            label: record.gesture_label.clone(),
        }
    }
}

impl From<gesture_record::Model> for PredictionSummary {
    fn from(record: gesture_record::Model) -> Self {
        Self::from(&record)
    }
}
