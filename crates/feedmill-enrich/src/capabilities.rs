//! Model capability seams.
//!
//! Each pretrained model the pipeline leans on is expressed as a trait so the
//! pipeline can be constructed with HTTP-backed clients in production and
//! plain in-memory doubles in tests. Implementations are shared read-only via
//! `Arc` and live for the whole process.

use async_trait::async_trait;

use crate::error::EnrichError;

/// Output of the sentiment classifier for one text.
#[derive(Debug, Clone)]
pub struct SentimentPrediction {
    /// `"POSITIVE"`, `"NEGATIVE"`, or anything else (treated as neutral).
    pub label: String,
    /// Classifier confidence in `[0, 1]`. Kept as `f64` so wire values like
    /// `0.9` stay exact enough for the star mapping (`0.9f32 * 5.0` lands
    /// just under 4.5 and would round the wrong way).
    pub confidence: f64,
}

/// A named-entity span found by the annotator. Text is verbatim from the
/// input, case preserved.
#[derive(Debug, Clone)]
pub struct EntitySpan {
    pub text: String,
    /// Entity type label, e.g. `"ORG"`, `"PERSON"`, `"GPE"`.
    pub label: String,
}

/// One part-of-speech-tagged, lemmatized token.
#[derive(Debug, Clone)]
pub struct AnnotatedToken {
    pub lemma: String,
    /// Universal POS tag, e.g. `"NOUN"`, `"PROPN"`, `"VERB"`.
    pub pos: String,
    pub is_stop: bool,
}

/// Linguistic annotation of one chunk of text.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub entities: Vec<EntitySpan>,
    pub tokens: Vec<AnnotatedToken>,
}

/// Text-to-vector encoder shared by chunk tagging and taxonomy setup.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Returns one vector per input text, in input order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EnrichError>;
}

/// Binary/ternary sentiment classifier.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentPrediction, EnrichError>;
}

/// Sentence boundaries plus entity/POS annotation.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn split_sentences(&self, text: &str) -> Result<Vec<String>, EnrichError>;
    async fn annotate(&self, text: &str) -> Result<Annotation, EnrichError>;
}
