//! Gesture prediction and prediction history.

mod error;
mod landmarks;
mod prediction;
mod service;
mod store;

pub use error::{GestureError, PredictionFailure};
pub use landmarks::{GestureInput, HandLandmarks, LANDMARKS_PER_HAND, Landmark, LandmarkError, MAX_HANDS};
pub use prediction::{PredictionRecordView, PredictionResult, PredictionStatus, PredictionSummary};
pub use service::GestureService;
pub use store::{NewPrediction, PredictionStore, RECENT_WINDOW};
