// src/error.rs

//! Unified error handling for the events scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network failure, timeout or non-success status while fetching
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// A single event fragment could not be read
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A full refresh of the event list failed
    #[error("Failed to scrape events: {0}")]
    Scrape(Box<AppError>),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Regex or CSS selector failed to compile
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a transport error for a request URL.
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Wrap a refresh failure. Already wrapped errors are passed through.
    pub fn scrape(source: AppError) -> Self {
        match source {
            Self::Scrape(_) => source,
            other => Self::Scrape(Box::new(other)),
        }
    }

    /// Create a pattern compilation error.
    pub fn pattern(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when the error came from the network layer, wrapped or not.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Http(_) => true,
            Self::Scrape(inner) => inner.is_transport(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_wraps_once() {
        let err = AppError::scrape(AppError::scrape(AppError::transport("http://x", "boom")));
        match err {
            AppError::Scrape(inner) => assert!(matches!(*inner, AppError::Transport { .. })),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_transport_sees_through_scrape() {
        let err = AppError::scrape(AppError::transport("http://x", "timed out"));
        assert!(err.is_transport());
        assert!(!AppError::extraction("bad").is_transport());
    }

    #[test]
    fn test_display_includes_url() {
        let err = AppError::transport("https://example.org", "status 503");
        assert_eq!(
            err.to_string(),
            "Transport error for https://example.org: status 503"
        );
    }
}
