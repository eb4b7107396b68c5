//! Search client for the music aggregator.
//!
//! Posts a form-encoded query and keeps only the first result; the full
//! payload is persisted to `songs_data.json` for diagnostics before any
//! field is inspected.

use crate::config;
use crate::error::{AppError, AppResult};
use crate::platform::Platform;
use serde::Deserialize;
use std::path::Path;

/// Placeholder for a result with no usable title.
pub const UNKNOWN_TITLE: &str = "未知歌曲";

/// Placeholder for a result with no usable author.
pub const UNKNOWN_AUTHOR: &str = "未知歌手";

/// One track from the aggregator's result list.
#[derive(Debug, Clone, Deserialize)]
pub struct SongResult {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default = "unknown_author")]
    pub author: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl SongResult {
    /// Playable stream URL; empty strings count as absent.
    pub fn stream_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

fn unknown_title() -> String {
    UNKNOWN_TITLE.to_string()
}

fn unknown_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(default)]
    data: Vec<SongResult>,
}

/// Result of a completed (HTTP 200) search.
#[derive(Debug)]
pub enum SearchOutcome {
    /// First element of the result list; the rest is discarded.
    Found(SongResult),
    /// The result list was empty.
    NotFound,
}

/// Client for the aggregator search endpoint.
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchClient {
    /// Client against the production endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(config::search::ENDPOINT)
    }

    /// Client against an explicit endpoint (tests point this at a mock).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config::search::USER_AGENT)
            .timeout(config::search::timeout())
            .build()
            .expect("HTTP client build failed: user_agent + timeout config should always succeed");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Search the aggregator for `title` on `platform`.
    ///
    /// Non-200 status and transport failures are `AppError::Search`; an empty
    /// result list is the distinct `SearchOutcome::NotFound`.
    pub async fn search(&self, title: &str, platform: Platform, results_file: &Path) -> AppResult<SearchOutcome> {
        let form = [
            ("input", title),
            ("filter", "name"),
            ("type", platform.token()),
            ("page", "1"),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Search(format!("HTTP {}", status.as_u16())));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("invalid JSON: {e}")))?;

        // Overwrites the previous payload; the file is diagnostics, not state.
        fs_err::write(results_file, serde_json::to_string_pretty(&payload)?)?;

        let parsed: SearchPayload = serde_json::from_value(payload)?;
        match parsed.data.into_iter().next() {
            Some(first) => {
                log::info!("🎵 Search hit: 《{}》 - {} ({})", first.title, first.author, platform.token());
                Ok(SearchOutcome::Found(first))
            }
            None => {
                log::info!("Search for 《{}》 on {} returned no results", title, platform.token());
                Ok(SearchOutcome::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_fields_mapped() {
        let result: SongResult = serde_json::from_value(json!({
            "title": "稻香",
            "author": "周杰伦",
            "url": "http://x/y.mp3",
            "link": "http://x/page"
        }))
        .unwrap();
        assert_eq!(result.title, "稻香");
        assert_eq!(result.author, "周杰伦");
        assert_eq!(result.stream_url(), Some("http://x/y.mp3"));
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let result: SongResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result.title, UNKNOWN_TITLE);
        assert_eq!(result.author, UNKNOWN_AUTHOR);
        assert_eq!(result.stream_url(), None);
    }

    #[test]
    fn test_empty_url_is_not_playable() {
        let result: SongResult = serde_json::from_value(json!({
            "title": "t", "author": "a", "url": ""
        }))
        .unwrap();
        assert_eq!(result.stream_url(), None);
    }

    #[test]
    fn test_payload_without_data_list() {
        let parsed: SearchPayload = serde_json::from_value(json!({"code": 200})).unwrap();
        assert!(parsed.data.is_empty());
    }
}
