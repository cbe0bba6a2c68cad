//! Shared types and configuration for the feedmill workspace.
//!
//! Holds the entry/record shapes exchanged between the feeds, enrich, and db
//! crates, the env-driven application config, the YAML feed-source registry,
//! and the pipeline options (tag strategy, padding, chunk budget).

mod app_config;
mod config;
mod feeds_file;
mod options;
mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use feeds_file::{load_feed_sources, FeedSourceConfig, FeedsFile};
pub use options::{PipelineOptions, TagStrategy, DEFAULT_SUMMARY_PADDING, DEFAULT_TAXONOMY};
pub use types::{ArticleRecord, FeedEntry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read feeds file {path}: {source}")]
    FeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse feeds file: {0}")]
    FeedsFileParse(#[from] serde_yaml::Error),
    #[error("invalid feeds file: {0}")]
    FeedsFileInvalid(String),
}
