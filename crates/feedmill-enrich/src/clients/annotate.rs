//! Linguistic annotation client.
//!
//! Talks to an annotation sidecar exposing `POST /sentences` (sentence
//! boundary detection) and `POST /annotate` (named entities plus
//! lemmatized, POS-tagged tokens), both taking `{"text": ...}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RetryPolicy;
use crate::capabilities::{AnnotatedToken, Annotation, Annotator, EntitySpan};
use crate::error::EnrichError;
use crate::retry::retry_with_backoff;

pub struct HttpAnnotator {
    client: reqwest::Client,
    sentences_url: String,
    annotate_url: String,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct SentencesResponse {
    sentences: Vec<String>,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    entities: Vec<EntityItem>,
    #[serde(default)]
    tokens: Vec<TokenItem>,
}

#[derive(Deserialize)]
struct EntityItem {
    text: String,
    label: String,
}

#[derive(Deserialize)]
struct TokenItem {
    lemma: String,
    pos: String,
    #[serde(default)]
    is_stop: bool,
}

impl HttpAnnotator {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, retry: RetryPolicy) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client,
            sentences_url: format!("{base}/sentences"),
            annotate_url: format!("{base}/annotate"),
            retry,
        }
    }

    async fn post_sentences(&self, text: &str) -> Result<Vec<String>, EnrichError> {
        let response = self
            .client
            .post(&self.sentences_url)
            .json(&AnnotateRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::Annotate(format!(
                "sentence split returned status {}",
                response.status()
            )));
        }

        let body: SentencesResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::Annotate(format!("sentence response parse error: {e}")))?;
        Ok(body.sentences)
    }

    async fn post_annotate(&self, text: &str) -> Result<Annotation, EnrichError> {
        let response = self
            .client
            .post(&self.annotate_url)
            .json(&AnnotateRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::Annotate(format!(
                "annotate returned status {}",
                response.status()
            )));
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| EnrichError::Annotate(format!("annotate response parse error: {e}")))?;

        Ok(Annotation {
            entities: body
                .entities
                .into_iter()
                .map(|e| EntitySpan {
                    text: e.text,
                    label: e.label,
                })
                .collect(),
            tokens: body
                .tokens
                .into_iter()
                .map(|t| AnnotatedToken {
                    lemma: t.lemma,
                    pos: t.pos,
                    is_stop: t.is_stop,
                })
                .collect(),
        })
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn split_sentences(&self, text: &str) -> Result<Vec<String>, EnrichError> {
        retry_with_backoff(
            self.retry.max_retries,
            self.retry.backoff_base_secs,
            || self.post_sentences(text),
        )
        .await
    }

    async fn annotate(&self, text: &str) -> Result<Annotation, EnrichError> {
        retry_with_backoff(
            self.retry.max_retries,
            self.retry.backoff_base_secs,
            || self.post_annotate(text),
        )
        .await
    }
}
