use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry yielded by an ingestion source, before any enrichment.
///
/// `summary_html` may carry markup; the normalizer is responsible for
/// reducing it to plain text. `link` is the canonical identity of the
/// article throughout the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary_html: String,
    pub published: Option<DateTime<Utc>>,
    /// `"{category} - {hostname}"`, e.g. `"Banking & Finance - livemint.com"`.
    pub source_label: String,
}

/// A fully enriched article, ready for the persistence gateway.
///
/// `tags`, `entities`, and `actions` are deduplicated, deterministically
/// ordered, and already joined with `", "`. The acceptance gate guarantees
/// `tags`/`entities` are non-empty and a sentiment score exists before a
/// record is ever constructed, so `sentiment_score` is not optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub link: String,
    /// Cleaned summary text chosen per `store_original_summary`.
    pub summary: String,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
    pub tags: String,
    /// 1–5 star scale, biased toward the outer buckets by design.
    pub sentiment_score: i32,
    pub entities: String,
    /// `None` when action extraction is disabled.
    pub actions: Option<String>,
}
