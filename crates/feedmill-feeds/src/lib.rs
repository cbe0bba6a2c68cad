//! RSS/Atom ingestion for feedmill.
//!
//! Fetches registered feeds over HTTP and normalizes their items into
//! [`feedmill_core::FeedEntry`] values tagged with a
//! `"{category} - {hostname}"` source label.

pub mod client;
pub mod error;
pub mod parse;

pub use client::FeedClient;
pub use error::FeedError;
pub use parse::{parse_entries, source_label};
