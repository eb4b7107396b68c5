//! Centralized error types.

use thiserror::Error;

/// Application-level errors for one song request.
///
/// Every request fails independently: these errors terminate the current
/// request with a user-visible reply and never propagate out of the host
/// adapter.
#[derive(Error, Debug)]
pub enum AppError {
    /// Search endpoint transport or status failure
    #[error("search request failed: {0}")]
    Search(String),

    /// Audio fetch returned a non-success status
    #[error("download failed with status: {0}")]
    DownloadStatus(reqwest::StatusCode),

    /// Audio fetch transport or file I/O failure
    #[error("download failed: {0}")]
    Download(String),

    /// Final reply could not be built or sent
    #[error("reply failed: {0}")]
    Reply(String),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
