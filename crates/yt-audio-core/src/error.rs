//! Error types for yt-audio-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("Failed to create output directory: {0}")]
    Storage(#[source] std::io::Error),

    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Rejected before anything touches the filesystem or the engine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL #{position} is not valid UTF-8 text: {lossy:?}")]
    NotText { position: usize, lossy: String },

    #[error("Empty URL provided (argument #{position})")]
    Blank { position: usize },
}

/// The single wrapper-level failure for anything the engine reports.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DownloadError {
    message: String,
}

impl DownloadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EngineError> for DownloadError {
    fn from(err: EngineError) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("yt-dlp not found. Install with: pip install yt-dlp (or brew install yt-dlp)")]
    NotFound,

    #[error("{message}")]
    Failed { code: Option<i32>, message: String },

    #[error("Failed to run yt-dlp: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_keeps_engine_text() {
        let err: DownloadError = EngineError::Failed {
            code: Some(1),
            message: "Unsupported URL: https://example.com".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unsupported URL: https://example.com");
    }

    #[test]
    fn test_download_is_transparent() {
        let err = Error::from(DownloadError::new("HTTP Error 403: Forbidden"));
        assert_eq!(err.to_string(), "HTTP Error 403: Forbidden");
    }
}
