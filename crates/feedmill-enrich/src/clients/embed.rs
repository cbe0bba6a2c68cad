//! Embedding inference client (TEI-style `/embed` contract).

use async_trait::async_trait;
use serde::Serialize;

use super::RetryPolicy;
use crate::capabilities::Embedder;
use crate::error::EnrichError;
use crate::retry::retry_with_backoff;

/// Maximum number of texts per /embed call.
const BATCH_SIZE: usize = 64;

pub struct HttpEmbedder {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl HttpEmbedder {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            url: format!("{}/embed", base_url.trim_end_matches('/')),
            retry,
        }
    }

    async fn embed_batch(&self, batch: &[&str]) -> Result<Vec<Vec<f32>>, EnrichError> {
        let request = EmbedRequest { inputs: batch };
        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(EnrichError::Embed(format!(
                "embed service returned status {}",
                response.status()
            )));
        }

        let embeddings: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| EnrichError::Embed(format!("embed response parse error: {e}")))?;

        if embeddings.len() != batch.len() {
            return Err(EnrichError::Embed(format!(
                "embed service returned {} vectors for {} inputs",
                embeddings.len(),
                batch.len()
            )));
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    /// Generate embeddings for a batch of texts.
    ///
    /// Texts are batched into groups of [`BATCH_SIZE`] per request. Returns
    /// one vector per input text, in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] on transport failure after retries, or
    /// [`EnrichError::Embed`] on a bad status/body.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EnrichError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_SIZE) {
            let embeddings = retry_with_backoff(
                self.retry.max_retries,
                self.retry.backoff_base_secs,
                || self.embed_batch(batch),
            )
            .await?;
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn embed_returns_one_vector_per_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .and(body_json(serde_json::json!({"inputs": ["a", "b"]})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    [0.1, 0.2],
                    [0.3, 0.4]
                ])),
            )
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(
            reqwest::Client::new(),
            &server.uri(),
            RetryPolicy {
                max_retries: 0,
                backoff_base_secs: 0,
            },
        );
        let vectors = embedder.embed(&["a", "b"]).await.expect("embed succeeds");
        assert_eq!(vectors.len(), 2);
        assert!((vectors[1][0] - 0.3).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn embed_count_mismatch_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([[0.1, 0.2]])),
            )
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(
            reqwest::Client::new(),
            &server.uri(),
            RetryPolicy {
                max_retries: 0,
                backoff_base_secs: 0,
            },
        );
        let result = embedder.embed(&["a", "b"]).await;
        assert!(matches!(result, Err(EnrichError::Embed(_))));
    }

    #[tokio::test]
    async fn embed_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(
            reqwest::Client::new(),
            &server.uri(),
            RetryPolicy {
                max_retries: 0,
                backoff_base_secs: 0,
            },
        );
        let result = embedder.embed(&["a"]).await;
        assert!(matches!(result, Err(EnrichError::Embed(_))));
    }
}
