//! Sentiment classifier client (TEI-style `/predict` contract).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RetryPolicy;
use crate::capabilities::{SentimentClassifier, SentimentPrediction};
use crate::error::EnrichError;
use crate::retry::retry_with_backoff;

pub struct HttpSentimentClassifier {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct PredictResponse {
    label: String,
    score: f64,
}

impl HttpSentimentClassifier {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            url: format!("{}/predict", base_url.trim_end_matches('/')),
            retry,
        }
    }

    async fn predict(&self, text: &str) -> Result<SentimentPrediction, EnrichError> {
        let request = PredictRequest { inputs: text };
        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(EnrichError::Classify(format!(
                "classifier returned status {}",
                response.status()
            )));
        }

        // The service ranks labels by score; the first entry is the winner.
        let predictions: Vec<PredictResponse> = response
            .json()
            .await
            .map_err(|e| EnrichError::Classify(format!("classifier response parse error: {e}")))?;

        let top = predictions
            .into_iter()
            .next()
            .ok_or_else(|| EnrichError::Classify("classifier returned no labels".to_string()))?;

        Ok(SentimentPrediction {
            label: top.label,
            confidence: top.score.clamp(0.0, 1.0),
        })
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] on transport failure after retries, or
    /// [`EnrichError::Classify`] on a bad status, unparsable body, or an
    /// empty label list.
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, EnrichError> {
        retry_with_backoff(
            self.retry.max_retries,
            self.retry.backoff_base_secs,
            || self.predict(text),
        )
        .await
    }
}
