use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embed error: {0}")]
    Embed(String),

    #[error("sentiment classify error: {0}")]
    Classify(String),

    #[error("annotation error: {0}")]
    Annotate(String),

    #[error("taxonomy error: {0}")]
    Taxonomy(String),
}
