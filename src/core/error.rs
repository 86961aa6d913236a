use thiserror::Error;

/// Centralized error types for the application
///
/// Adapters, delivery and the counters store all return this enum. Handlers
/// never show it to users; they log it and send a generic message instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Download/yt-dlp errors
    #[error("Download error: {0}")]
    Download(String),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// A lookup service answered without the expected video link
    #[error("{service} response has no `{field}` field")]
    MissingField { service: &'static str, field: &'static str },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Download(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Download(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = AppError::MissingField {
            service: "tikmate",
            field: "videoUrl",
        };
        assert_eq!(err.to_string(), "tikmate response has no `videoUrl` field");
    }

    #[test]
    fn test_string_converts_to_download_error() {
        let err: AppError = "yt-dlp exited with 1".into();
        assert!(matches!(err, AppError::Download(_)));
    }
}
