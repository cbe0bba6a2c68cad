//! Topic tagging, both strategies.
//!
//! The taxonomy strategy scores a chunk embedding against precomputed label
//! embeddings by cosine similarity and keeps the top N. The dynamic strategy
//! mines tags straight out of the linguistic annotation. One run uses exactly
//! one of the two.

use crate::capabilities::{Annotation, Embedder};
use crate::error::EnrichError;

/// Entity types eligible as dynamic tags.
const DYNAMIC_TAG_ENTITY_LABELS: &[&str] = &["ORG", "PERSON", "GPE", "EVENT", "PRODUCT", "LAW"];

/// Fixed tag labels with their precomputed embeddings, in declaration order.
pub struct Taxonomy {
    labels: Vec<String>,
    vectors: Vec<Vec<f32>>,
}

impl Taxonomy {
    /// Embed `labels` once so per-chunk scoring is a pure dot-product pass.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Taxonomy`] for an empty label list, or any
    /// embedder error.
    pub async fn build(embedder: &dyn Embedder, labels: &[&str]) -> Result<Self, EnrichError> {
        if labels.is_empty() {
            return Err(EnrichError::Taxonomy("taxonomy has no labels".to_string()));
        }
        let vectors = embedder.embed(labels).await?;
        if vectors.len() != labels.len() {
            return Err(EnrichError::Taxonomy(format!(
                "embedder returned {} vectors for {} labels",
                vectors.len(),
                labels.len()
            )));
        }
        Ok(Self {
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
            vectors,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The `top_n` labels most similar to `chunk_vector`, best first.
    ///
    /// Ties break toward the earlier taxonomy entry. As long as the taxonomy
    /// has at least `top_n` labels the result has exactly `top_n` entries,
    /// however weak the similarities are.
    #[must_use]
    pub fn top_matches(&self, chunk_vector: &[f32], top_n: usize) -> Vec<String> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine_similarity(chunk_vector, v)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored
            .into_iter()
            .take(top_n)
            .map(|(i, _)| self.labels[i].clone())
            .collect()
    }
}

/// Cosine similarity of two vectors; `0.0` when either has zero norm or the
/// dimensions disagree.
#[must_use]
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Open-vocabulary tags from one chunk's annotation.
///
/// Takes entities of the eligible types lower-cased, plus non-stopword
/// noun/proper-noun lemmas longer than 2 characters, lower-cased. Order
/// follows the annotation; the article aggregator deduplicates.
#[must_use]
pub fn dynamic_tags(annotation: &Annotation) -> Vec<String> {
    let mut tags = Vec::new();
    for entity in &annotation.entities {
        if DYNAMIC_TAG_ENTITY_LABELS.contains(&entity.label.as_str()) {
            tags.push(entity.text.to_lowercase());
        }
    }
    for token in &annotation.tokens {
        if (token.pos == "NOUN" || token.pos == "PROPN")
            && !token.is_stop
            && token.lemma.chars().count() > 2
        {
            tags.push(token.lemma.to_lowercase());
        }
    }
    tags
}
