use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One category of feed URLs from the registry file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSourceConfig {
    /// Human-readable category, e.g. `"Banking & Finance"`. Becomes the
    /// first half of each entry's source label.
    pub category: String,
    pub urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    pub sources: Vec<FeedSourceConfig>,
}

/// Load and validate the feed-source registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty registry, blank category, URL without a scheme).
pub fn load_feed_sources(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let feeds_file: FeedsFile = serde_yaml::from_str(&content)?;
    validate_feeds(&feeds_file)?;
    Ok(feeds_file)
}

fn validate_feeds(file: &FeedsFile) -> Result<(), ConfigError> {
    if file.sources.is_empty() {
        return Err(ConfigError::FeedsFileInvalid(
            "feeds file declares no sources".to_string(),
        ));
    }
    for source in &file.sources {
        if source.category.trim().is_empty() {
            return Err(ConfigError::FeedsFileInvalid(
                "source with empty category".to_string(),
            ));
        }
        if source.urls.is_empty() {
            return Err(ConfigError::FeedsFileInvalid(format!(
                "category '{}' has no urls",
                source.category
            )));
        }
        for url in &source.urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::FeedsFileInvalid(format!(
                    "url '{url}' in category '{}' is not http(s)",
                    source.category
                )));
            }
        }
    }
    Ok(())
}
