//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the protocol-facing server and the HTTP
//! transport that fronts it.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{ApiKey, Config, FirecrawlConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{HttpConfig, HttpTransport, build_router};
