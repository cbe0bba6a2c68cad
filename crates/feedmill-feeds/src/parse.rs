//! Feed XML into normalized entries.

use feedmill_core::FeedEntry;

use crate::error::FeedError;

/// Parse an RSS/Atom document into entries tagged with a source label.
///
/// Entries without a link are dropped; everything downstream keys on the link,
/// so an entry without one can never be stored or deduplicated. A missing
/// title or summary becomes an empty string and is left for the enrichment
/// gate to reject.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] when the document is not a recognizable feed.
pub fn parse_entries(body: &[u8], category: &str, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let feed = feed_rs::parser::parse(body).map_err(|source| FeedError::Parse {
        url: feed_url.to_string(),
        source,
    })?;

    let label = source_label(category, feed_url);
    let mut entries = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
            tracing::debug!(feed_url, "dropping entry without a link");
            continue;
        };
        // Prefer the summary; fall back to full content for feeds that
        // only populate one of the two.
        let summary_html = entry
            .summary
            .map(|t| t.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default();
        entries.push(FeedEntry {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link,
            summary_html,
            published: entry.published,
            source_label: label.clone(),
        });
    }
    Ok(entries)
}

/// `"{category} - {hostname}"` label identifying where an entry came from.
///
/// Falls back to `"unknown"` when no hostname can be pulled out of the URL.
#[must_use]
pub fn source_label(category: &str, feed_url: &str) -> String {
    format!("{category} - {}", extract_hostname(feed_url))
}

/// Hostname of a URL. Strips scheme and path by hand; the inputs are operator
/// supplied feed URLs, not arbitrary user data.
fn extract_hostname(feed_url: &str) -> &str {
    let without_scheme = feed_url
        .strip_prefix("https://")
        .or_else(|| feed_url.strip_prefix("http://"))
        .unwrap_or(feed_url);
    let host = without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default();
    if host.is_empty() {
        "unknown"
    } else {
        host
    }
}
