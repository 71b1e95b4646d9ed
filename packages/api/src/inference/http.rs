use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::Rng;
use reqwest::{Client, Response};

use super::{Classifier, InferenceUnavailable};
use crate::gesture::{GestureInput, PredictionResult};

pub const PREDICT_PATH: &str = "/predict";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_JITTER_MS: RangeInclusive<u64> = 50..=250;

#[derive(Clone, Debug)]
pub struct InferenceConfig {
    /// Base URL of the classifier, without the `/predict` path.
    pub base_url: String,
    pub timeout: Duration,
    /// Retry once after a transport failure. Responses are never retried.
    pub retry_transport_errors: bool,
}

impl InferenceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_transport_errors: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_transport_retry(mut self, enabled: bool) -> Self {
        self.retry_transport_errors = enabled;
        self
    }
}

pub struct HttpClassifier {
    client: Client,
    base_url: String,
    endpoint: String,
    retry_transport_errors: bool,
}

impl HttpClassifier {
    pub fn new(config: &InferenceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url, PREDICT_PATH),
            base_url,
            retry_transport_errors: config.retry_transport_errors,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, input: &GestureInput) -> Result<Response, reqwest::Error> {
        self.client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(input)
            .send()
            .await
    }

    async fn send(&self, input: &GestureInput) -> Result<Response, InferenceUnavailable> {
        match self.send_once(input).await {
            Ok(response) => Ok(response),
            Err(err) if self.retry_transport_errors => {
                let delay_ms = rand::rng().random_range(RETRY_JITTER_MS);
                tracing::warn!(
                    endpoint = %self.endpoint,
                    delay_ms,
                    "Classifier transport error, retrying once: {}",
                    err
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;

                self.send_once(input).await.map_err(|err| {
                    InferenceUnavailable::with_source("request to classifier failed after retry", err)
                })
            }
            Err(err) => Err(InferenceUnavailable::with_source(
                "request to classifier failed",
                err,
            )),
        }
    }

    async fn request(&self, input: &GestureInput) -> Result<PredictionResult, InferenceUnavailable> {
        let response = self.send(input).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceUnavailable::new(format!(
                "classifier returned {}: {}",
                status, body
            )));
        }

        let body = response.bytes().await.map_err(|err| {
            InferenceUnavailable::with_source("failed to read classifier response", err)
        })?;

        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(InferenceUnavailable::new("classifier returned an empty response"));
        }

        serde_json::from_slice(&body).map_err(|err| {
            InferenceUnavailable::with_source("unparseable classifier response", err)
        })
    }
}

#[async_trait::async_trait]
impl Classifier for HttpClassifier {
    #[tracing::instrument(name = "classifier.classify", skip(self, input), fields(hands = input.hand_count()))]
    async fn classify(&self, input: &GestureInput) -> Result<PredictionResult, InferenceUnavailable> {
        let started = Instant::now();
        let outcome = self.request(input).await;

        metrics::histogram!("inference_request_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        let label = if outcome.is_ok() { "ok" } else { "unavailable" };
        metrics::counter!("inference_requests_total", "outcome" => label).increment(1);

        if let Err(err) = &outcome {
            tracing::error!(endpoint = %self.endpoint, "Classifier call failed: {}", err);
        }

        outcome
    }

    #[tracing::instrument(name = "classifier.ping", skip(self))]
    async fn ping(&self) -> Result<Duration, InferenceUnavailable> {
        let started = Instant::now();
        // Any HTTP answer means the service is up, whatever it serves at its root.
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|err| InferenceUnavailable::with_source("classifier unreachable", err))?;
        let elapsed = started.elapsed();

        tracing::debug!(status = %response.status(), ?elapsed, "Classifier answered");
        Ok(elapsed)
    }
}
