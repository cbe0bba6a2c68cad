use std::time::Duration;

use reqwest::Client;

use feedmill_core::FeedEntry;

use crate::error::FeedError;
use crate::parse::parse_entries;

/// HTTP client for registered RSS/Atom feeds.
///
/// One client is shared across every feed in a run; timeout and `User-Agent`
/// come from configuration.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one feed and return its entries, labeled with
    /// `"{category} - {hostname}"`.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] for any non-2xx response.
    /// - [`FeedError::Http`] for network or timeout failures.
    /// - [`FeedError::Parse`] when the body is not a recognizable feed.
    pub async fn fetch(&self, category: &str, feed_url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let response = self.client.get(feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: feed_url.to_string(),
            });
        }
        let body = response.bytes().await?;
        let entries = parse_entries(&body, category, feed_url)?;
        tracing::debug!(feed_url, entries = entries.len(), "fetched feed");
        Ok(entries)
    }
}
