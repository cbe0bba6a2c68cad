//! Per-entry enrichment orchestration.
//!
//! One `Pipeline` holds the injected model capabilities and run options, and
//! turns a `FeedEntry` into either an `ArticleRecord` or a skip with a typed
//! reason. Per-chunk model failures are logged and contribute nothing; the
//! entry keeps going. Only sentence splitting (one call per article, before
//! any chunk exists) propagates as an error.

use std::sync::Arc;

use feedmill_core::{ArticleRecord, FeedEntry, PipelineOptions, TagStrategy, DEFAULT_TAXONOMY};

use crate::aggregate::ArticleDraft;
use crate::capabilities::{Annotator, Embedder, SentimentClassifier};
use crate::chunk::pack_sentences;
use crate::error::EnrichError;
use crate::extract::extract_entities_and_actions;
use crate::normalize::normalize_summary;
use crate::sentiment::star_rating;
use crate::tags::{dynamic_tags, Taxonomy};

/// Why an entry was dropped without a persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing survived markup stripping.
    EmptySummary,
    /// Below the word floor even after padding.
    UnderMinimumWords { words: usize },
    /// The sentence splitter found no sentences in the padded text.
    NoSentences,
    /// The acceptance gate failed: all three of tags, sentiment, and
    /// entities must be present.
    QualityGate {
        has_tags: bool,
        has_sentiment: bool,
        has_entities: bool,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptySummary => write!(f, "empty summary after cleaning"),
            SkipReason::UnderMinimumWords { words } => {
                write!(f, "summary under word floor after padding ({words} words)")
            }
            SkipReason::NoSentences => write!(f, "no sentences detected"),
            SkipReason::QualityGate {
                has_tags,
                has_sentiment,
                has_entities,
            } => write!(
                f,
                "quality gate failed (tags: {has_tags}, sentiment: {has_sentiment}, entities: {has_entities})"
            ),
        }
    }
}

/// Result of enriching one entry.
#[derive(Debug)]
pub enum EnrichOutcome {
    Enriched(ArticleRecord),
    Skipped(SkipReason),
}

pub struct Pipeline {
    embedder: Arc<dyn Embedder>,
    classifier: Arc<dyn SentimentClassifier>,
    annotator: Arc<dyn Annotator>,
    options: PipelineOptions,
    /// Present only for the fixed-taxonomy tag strategy.
    taxonomy: Option<Taxonomy>,
}

impl Pipeline {
    /// Construct a pipeline, precomputing taxonomy embeddings when the
    /// fixed-taxonomy strategy is selected.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError`] if the taxonomy cannot be embedded.
    pub async fn new(
        embedder: Arc<dyn Embedder>,
        classifier: Arc<dyn SentimentClassifier>,
        annotator: Arc<dyn Annotator>,
        options: PipelineOptions,
    ) -> Result<Self, EnrichError> {
        let taxonomy = match options.tag_strategy {
            TagStrategy::Taxonomy => {
                Some(Taxonomy::build(embedder.as_ref(), DEFAULT_TAXONOMY).await?)
            }
            TagStrategy::DynamicNer => None,
        };
        Ok(Self {
            embedder,
            classifier,
            annotator,
            options,
            taxonomy,
        })
    }

    #[must_use]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Enrich one entry into an article record, or skip it with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError`] only when sentence splitting fails; every
    /// per-chunk capability failure is logged and absorbed.
    pub async fn enrich(&self, entry: &FeedEntry) -> Result<EnrichOutcome, EnrichError> {
        let normalized = match normalize_summary(
            &entry.summary_html,
            self.options.min_summary_words,
            &self.options.padding,
        ) {
            Ok(normalized) => normalized,
            Err(reason) => return Ok(EnrichOutcome::Skipped(reason)),
        };

        let sentences = self.annotator.split_sentences(&normalized.padded).await?;
        let chunks = pack_sentences(&sentences, self.options.max_chunk_words);
        if chunks.is_empty() {
            return Ok(EnrichOutcome::Skipped(SkipReason::NoSentences));
        }

        let mut draft = ArticleDraft::new();

        for chunk in &chunks {
            if matches!(self.options.tag_strategy, TagStrategy::Taxonomy) {
                self.tag_chunk_by_taxonomy(entry, chunk, &mut draft).await;
            }
            self.score_chunk_sentiment(entry, chunk, &mut draft).await;
            self.annotate_chunk(entry, chunk, &mut draft).await;
        }

        match draft.finish(
            self.options.include_actions,
            self.options.sort_joined_sets,
        ) {
            Ok(derived) => {
                let summary = if self.options.store_original_summary {
                    normalized.original
                } else {
                    normalized.padded
                };
                Ok(EnrichOutcome::Enriched(ArticleRecord {
                    title: entry.title.clone(),
                    link: entry.link.clone(),
                    summary,
                    published: entry.published,
                    source: entry.source_label.clone(),
                    tags: derived.tags,
                    sentiment_score: derived.sentiment_score,
                    entities: derived.entities,
                    actions: derived.actions,
                }))
            }
            Err(reason) => Ok(EnrichOutcome::Skipped(reason)),
        }
    }

    async fn tag_chunk_by_taxonomy(&self, entry: &FeedEntry, chunk: &str, draft: &mut ArticleDraft) {
        let Some(taxonomy) = &self.taxonomy else {
            return;
        };
        match self.embedder.embed(&[chunk]).await {
            Ok(vectors) => {
                if let Some(vector) = vectors.first() {
                    draft.add_tags(taxonomy.top_matches(vector, self.options.taxonomy_top_n));
                }
            }
            Err(e) => {
                tracing::warn!(link = %entry.link, error = %e, "chunk embedding failed; no tags from this chunk");
            }
        }
    }

    async fn score_chunk_sentiment(&self, entry: &FeedEntry, chunk: &str, draft: &mut ArticleDraft) {
        let truncated = truncate_chars(chunk, self.options.classifier_max_chars);
        match self.classifier.classify(truncated).await {
            Ok(prediction) => draft.add_sentiment(star_rating(&prediction)),
            Err(e) => {
                tracing::warn!(link = %entry.link, error = %e, "sentiment classification failed; chunk contributes no score");
            }
        }
    }

    async fn annotate_chunk(&self, entry: &FeedEntry, chunk: &str, draft: &mut ArticleDraft) {
        match self.annotator.annotate(chunk).await {
            Ok(annotation) => {
                if matches!(self.options.tag_strategy, TagStrategy::DynamicNer) {
                    draft.add_tags(dynamic_tags(&annotation));
                }
                let extraction =
                    extract_entities_and_actions(&annotation, self.options.include_actions);
                draft.add_entities(extraction.entities);
                draft.add_actions(extraction.actions);
            }
            Err(e) => {
                tracing::warn!(link = %entry.link, error = %e, "annotation failed; chunk contributes no entities");
            }
        }
    }
}

/// First `max` characters of `text`, respecting char boundaries.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
