//! The ingest command: fetch registered feeds, enrich each entry, store.
//!
//! Per-feed and per-article failures are logged and skipped rather than
//! propagated so one bad feed or entry does not abort the full run.

use std::sync::Arc;
use std::time::Duration;

use feedmill_core::{load_feed_sources, AppConfig, PipelineOptions};
use feedmill_enrich::{
    EnrichOutcome, HttpAnnotator, HttpEmbedder, HttpSentimentClassifier, Pipeline, RetryPolicy,
};
use feedmill_feeds::FeedClient;

/// Aggregated counts for one ingest run.
#[derive(Debug, Default)]
pub struct IngestTotals {
    /// Articles upserted (or, in a dry run, articles that would have been).
    pub stored: u32,
    /// Entries dropped with a skip reason.
    pub skipped: u32,
    /// Entries or feeds that errored.
    pub failed: u32,
}

/// Fetch every registered feed (optionally one category) and run each entry
/// through the enrichment pipeline.
pub async fn run(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    options: PipelineOptions,
    category_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<IngestTotals> {
    let feeds = load_feed_sources(&config.feeds_path)?;
    let sources: Vec<_> = feeds
        .sources
        .into_iter()
        .filter(|s| {
            category_filter.is_none_or(|wanted| s.category.eq_ignore_ascii_case(wanted))
        })
        .collect();
    if sources.is_empty() {
        anyhow::bail!(
            "no feed sources matched{}",
            category_filter.map_or_else(String::new, |c| format!(" category '{c}'"))
        );
    }

    let pipeline = build_pipeline(config, options).await?;
    let feed_client = FeedClient::new(config.feed_request_timeout_secs, &config.feed_user_agent)?;

    let mut totals = IngestTotals::default();

    for source in &sources {
        for url in &source.urls {
            let entries = match feed_client.fetch(&source.category, url).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::error!(feed_url = %url, error = %e, "feed fetch failed");
                    totals.failed += 1;
                    continue;
                }
            };
            tracing::info!(feed_url = %url, entries = entries.len(), "processing feed");

            for entry in &entries {
                match pipeline.enrich(entry).await {
                    Ok(EnrichOutcome::Enriched(article)) => {
                        if dry_run {
                            tracing::info!(link = %article.link, tags = %article.tags, sentiment = article.sentiment_score, "dry run: would store");
                            totals.stored += 1;
                            continue;
                        }
                        match feedmill_db::upsert_article(pool, &article).await {
                            Ok(_) => {
                                tracing::info!(link = %article.link, tags = %article.tags, sentiment = article.sentiment_score, "stored");
                                totals.stored += 1;
                            }
                            Err(e) => {
                                tracing::error!(title = %article.title, link = %article.link, error = %e, "store failed");
                                totals.failed += 1;
                            }
                        }
                    }
                    Ok(EnrichOutcome::Skipped(reason)) => {
                        tracing::info!(link = %entry.link, reason = %reason, "skipped");
                        totals.skipped += 1;
                    }
                    Err(e) => {
                        tracing::warn!(link = %entry.link, error = %e, "enrichment failed");
                        totals.failed += 1;
                    }
                }
            }
        }
    }

    Ok(totals)
}

async fn build_pipeline(
    config: &AppConfig,
    options: PipelineOptions,
) -> anyhow::Result<Pipeline> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.model_request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    let retry = RetryPolicy {
        max_retries: config.max_retries,
        backoff_base_secs: config.retry_backoff_base_secs,
    };

    let embedder = Arc::new(HttpEmbedder::new(http.clone(), &config.embed_url, retry));
    let classifier = Arc::new(HttpSentimentClassifier::new(
        http.clone(),
        &config.sentiment_url,
        retry,
    ));
    let annotator = Arc::new(HttpAnnotator::new(http, &config.annotate_url, retry));

    Ok(Pipeline::new(embedder, classifier, annotator, options).await?)
}
