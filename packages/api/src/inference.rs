//! Adapter to the external gesture classifier.
//!
//! The classifier is a separate service with its own lifecycle. This module
//! only knows its request/response contract.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::gesture::{GestureInput, PredictionResult};

mod http;

pub use http::{HttpClassifier, InferenceConfig};

/// Any failure to obtain a usable classification. Transport errors, non-2xx
/// responses and empty or malformed bodies are deliberately not distinguished.
///
/// `Display` appends the whole source chain, so a single log line carries the
/// underlying cause.
#[derive(Debug, Error)]
#[error("inference service unavailable: {message}{}", SourceChain(.source.as_deref()))]
pub struct InferenceUnavailable {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl InferenceUnavailable {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

struct SourceChain<'a>(Option<&'a (dyn std::error::Error + Send + Sync + 'static)>);

impl fmt::Display for SourceChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut next = self.0.map(|err| err as &(dyn std::error::Error + 'static));
        while let Some(err) = next {
            write!(f, ": {}", err)?;
            next = err.source();
        }
        Ok(())
    }
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// One complete classification round trip. Never cached.
    async fn classify(&self, input: &GestureInput) -> Result<PredictionResult, InferenceUnavailable>;

    /// Round trip to the classifier without classifying anything.
    async fn ping(&self) -> Result<Duration, InferenceUnavailable>;
}

pub type DynClassifier = Arc<dyn Classifier>;
