/// Candidate topic labels for the embedding-similarity tagging strategy.
///
/// Order matters: similarity ties are broken by position in this list.
pub const DEFAULT_TAXONOMY: &[&str] = &[
    "banking",
    "finance",
    "loan",
    "insurance",
    "stock market",
    "investments",
    "RBI",
    "startup",
];

/// Filler passage appended to short summaries until the minimum word floor
/// is met. Generic enough not to skew tagging toward any taxonomy label.
pub const DEFAULT_SUMMARY_PADDING: &str = "This article discusses the topic in detail including relevant background, context, and implications. The financial and economic outlook are explored with expert commentary and statistics. Real-world examples are provided to help understand the situation.";

/// Which tagging strategy a pipeline run uses. The two are mutually
/// exclusive; there is no combined mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStrategy {
    /// Cosine similarity of chunk embeddings against the fixed taxonomy.
    Taxonomy,
    /// Open-vocabulary tags from named entities and noun lemmas.
    DynamicNer,
}

/// All knobs of one enrichment run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub tag_strategy: TagStrategy,
    /// Collect verb lemmas into the article's action set.
    pub include_actions: bool,
    /// Persist the unpadded cleaned summary instead of the padded text.
    pub store_original_summary: bool,
    /// Sort tag/entity/action sets alphabetically before joining; when
    /// `false` the sets keep first-seen insertion order. Both are
    /// deterministic.
    pub sort_joined_sets: bool,
    /// Articles whose cleaned summary stays under this word count after
    /// padding are rejected outright.
    pub min_summary_words: usize,
    pub max_chunk_words: usize,
    /// Tags selected per chunk by the taxonomy strategy.
    pub taxonomy_top_n: usize,
    /// Sentiment classifier input truncation, in characters.
    pub classifier_max_chars: usize,
    pub padding: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            tag_strategy: TagStrategy::Taxonomy,
            include_actions: true,
            store_original_summary: true,
            sort_joined_sets: false,
            min_summary_words: 100,
            max_chunk_words: 400,
            taxonomy_top_n: 3,
            classifier_max_chars: 512,
            padding: DEFAULT_SUMMARY_PADDING.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_documented_values() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.tag_strategy, TagStrategy::Taxonomy);
        assert_eq!(opts.min_summary_words, 100);
        assert_eq!(opts.max_chunk_words, 400);
        assert_eq!(opts.taxonomy_top_n, 3);
        assert_eq!(opts.classifier_max_chars, 512);
        assert!(opts.store_original_summary);
    }

    #[test]
    fn default_taxonomy_has_enough_entries_for_top_n() {
        let opts = PipelineOptions::default();
        assert!(DEFAULT_TAXONOMY.len() >= opts.taxonomy_top_n);
    }

    #[test]
    fn padding_passage_is_non_empty() {
        assert!(DEFAULT_SUMMARY_PADDING.split_whitespace().count() > 10);
    }
}
