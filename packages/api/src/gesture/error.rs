use sea_orm::DbErr;
use thiserror::Error;

use super::landmarks::LandmarkError;
use crate::inference::InferenceUnavailable;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("invalid gesture input: {0}")]
    InvalidInput(#[source] LandmarkError),

    /// Nothing was written.
    #[error("prediction failed: {0}")]
    PredictionFailed(#[source] PredictionFailure),

    #[error("persistence failed: {0}")]
    PersistenceFailed(#[from] DbErr),

    #[error("prediction record {0} not found")]
    NotFound(i32),
}

#[derive(Debug, Error)]
pub enum PredictionFailure {
    #[error(transparent)]
    Inference(#[from] InferenceUnavailable),

    #[error("could not encode landmarks: {0}")]
    Encoding(#[source] LandmarkError),
}

impl From<InferenceUnavailable> for GestureError {
    fn from(err: InferenceUnavailable) -> Self {
        Self::PredictionFailed(PredictionFailure::Inference(err))
    }
}
