//! Firecrawl request and response types.
//!
//! Response records are built from raw `serde_json::Value`s instead of strict
//! deserialization: the service omits fields freely, even on success, and a
//! single unexpected field type must not sink the whole payload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output formats accepted by the scrape endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ScrapeFormat {
    Markdown,
    Html,
    RawHtml,
    Links,
    Screenshot,
    ScreenshotFullPage,
    Json,
    ChangeTracking,
}

impl ScrapeFormat {
    /// Wire name of this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::RawHtml => "rawHtml",
            Self::Links => "links",
            Self::Screenshot => "screenshot",
            Self::ScreenshotFullPage => "screenshotFullPage",
            Self::Json => "json",
            Self::ChangeTracking => "changeTracking",
        }
    }
}

/// Result of a scrape call. No field is guaranteed, even when `success` is true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteScrapeResult {
    pub success: bool,
    pub markdown: Option<String>,
    pub links: Option<Vec<String>>,
    pub error: Option<String>,
}

impl RemoteScrapeResult {
    /// Parse a scrape response body.
    ///
    /// Firecrawl nests page content under `data`; a flat body (content next
    /// to `success`) is accepted as well.
    pub fn from_value(value: &Value) -> Self {
        let content = match value.get("data") {
            Some(data) if data.is_object() => data,
            _ => value,
        };

        let links = content.get("links").and_then(Value::as_array).map(|links| {
            links
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        Self {
            success: success_flag(value),
            markdown: content
                .get("markdown")
                .and_then(Value::as_str)
                .map(str::to_string),
            links,
            error: error_message(value),
        }
    }
}

/// Result of a search call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteSearchResult {
    pub success: bool,
    /// Search hits, kept verbatim. Each usually carries `url`, `title` and
    /// `description`.
    pub data: Option<Vec<Value>>,
    pub error: Option<String>,
}

impl RemoteSearchResult {
    /// Parse a search response body.
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: success_flag(value),
            data: value.get("data").and_then(Value::as_array).cloned(),
            error: error_message(value),
        }
    }
}

fn success_flag(value: &Value) -> bool {
    value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn error_message(value: &Value) -> Option<String> {
    match value.get("error") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
