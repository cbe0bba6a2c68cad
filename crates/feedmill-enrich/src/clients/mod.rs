//! HTTP-backed implementations of the model capability traits.
//!
//! Each client wraps one sidecar inference service and speaks a small JSON
//! contract. All requests go through a shared `reqwest::Client` (the caller
//! sets the timeout when building it) and transient transport failures are
//! retried with bounded backoff.

mod annotate;
mod classify;
mod embed;

pub use annotate::HttpAnnotator;
pub use classify::HttpSentimentClassifier;
pub use embed::HttpEmbedder;

/// Retry settings shared by the capability clients.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_secs: 2,
        }
    }
}
