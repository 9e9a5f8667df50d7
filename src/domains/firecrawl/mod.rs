//! Firecrawl domain module.
//!
//! Client side of the remote content-extraction service. Tools only depend on
//! the [`ContentService`] trait; [`FirecrawlClient`] is the production
//! implementation talking to the Firecrawl HTTP API.
//!
//! ## Architecture
//!
//! - `types.rs` - Scrape formats and the defensively parsed result records
//! - `client.rs` - `ContentService` trait and the reqwest-based client
//! - `error.rs` - Client error types

mod client;
mod error;
mod types;

pub use client::{ContentService, FirecrawlClient};
pub use error::FirecrawlError;
pub use types::{RemoteScrapeResult, RemoteSearchResult, ScrapeFormat};
