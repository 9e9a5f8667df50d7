//! Domains module containing business logic organized by bounded contexts.
//!
//! - **firecrawl**: HTTP client for the remote scrape and search API
//! - **tools**: tool registry, lazily initialized session and tool definitions

pub mod firecrawl;
pub mod tools;
