//! Per-chunk outputs into one article-level result.
//!
//! Accumulation keeps first-seen insertion order while deduplicating, so the
//! joined strings are reproducible run to run; `sort_joined_sets` switches to
//! lexicographic order at the serialization boundary for the variant that
//! stored sorted sets.

use crate::pipeline::SkipReason;
use crate::sentiment::SentimentTally;

/// Append `value` unless the set already holds it.
fn push_unique(set: &mut Vec<String>, value: String) {
    if !value.is_empty() && !set.contains(&value) {
        set.push(value);
    }
}

/// Join a deduplicated set for storage.
#[must_use]
pub fn join_set(values: &[String], sort: bool) -> String {
    if sort {
        let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.join(", ")
    } else {
        values.join(", ")
    }
}

/// Accumulates derived outputs across the chunks of one article.
#[derive(Debug, Default)]
pub struct ArticleDraft {
    tags: Vec<String>,
    entities: Vec<String>,
    actions: Vec<String>,
    sentiment: SentimentTally,
}

/// The derived fields of an article that cleared the acceptance gate.
#[derive(Debug)]
pub struct DerivedFields {
    pub tags: String,
    pub sentiment_score: i32,
    pub entities: String,
    /// `None` when action extraction was disabled for the run.
    pub actions: Option<String>,
}

impl ArticleDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tags<I: IntoIterator<Item = String>>(&mut self, tags: I) {
        for tag in tags {
            push_unique(&mut self.tags, tag);
        }
    }

    pub fn add_entities<I: IntoIterator<Item = String>>(&mut self, entities: I) {
        for entity in entities {
            push_unique(&mut self.entities, entity);
        }
    }

    pub fn add_actions<I: IntoIterator<Item = String>>(&mut self, actions: I) {
        for action in actions {
            push_unique(&mut self.actions, action);
        }
    }

    pub fn add_sentiment(&mut self, stars: i32) {
        self.sentiment.add(stars);
    }

    /// Apply the acceptance gate and serialize the sets.
    ///
    /// An article is only persisted when all three of tags, sentiment, and
    /// entities came out non-empty; partial enrichment is discarded rather
    /// than stored.
    ///
    /// # Errors
    ///
    /// Returns [`SkipReason::QualityGate`] naming which of the three checks
    /// failed.
    pub fn finish(self, include_actions: bool, sort: bool) -> Result<DerivedFields, SkipReason> {
        let sentiment_score = self.sentiment.mean();
        let has_tags = !self.tags.is_empty();
        let has_entities = !self.entities.is_empty();

        let Some(sentiment_score) = sentiment_score else {
            return Err(SkipReason::QualityGate {
                has_tags,
                has_sentiment: false,
                has_entities,
            });
        };
        if !has_tags || !has_entities {
            return Err(SkipReason::QualityGate {
                has_tags,
                has_sentiment: true,
                has_entities,
            });
        }

        Ok(DerivedFields {
            tags: join_set(&self.tags, sort),
            sentiment_score,
            entities: join_set(&self.entities, sort),
            actions: include_actions.then(|| join_set(&self.actions, sort)),
        })
    }
}
