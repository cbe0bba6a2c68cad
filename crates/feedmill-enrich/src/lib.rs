//! Article enrichment pipeline for feedmill.
//!
//! Normalizes raw feed summaries, chunks them on sentence boundaries, and runs
//! each chunk through embedding, sentiment, and linguistic-annotation services
//! to derive tags, a star rating, entities, and action verbs per article. The
//! model services are injected behind traits so tests run against in-process
//! doubles and wiremock servers.

pub mod aggregate;
pub mod capabilities;
pub mod chunk;
pub mod clients;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod sentiment;
pub mod tags;

mod retry;

pub use capabilities::{
    AnnotatedToken, Annotation, Annotator, Embedder, EntitySpan, SentimentClassifier,
    SentimentPrediction,
};
pub use clients::{HttpAnnotator, HttpEmbedder, HttpSentimentClassifier, RetryPolicy};
pub use error::EnrichError;
pub use pipeline::{EnrichOutcome, Pipeline, SkipReason};
