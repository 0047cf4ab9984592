// src/utils/http.rs

//! HTTP fetching.
//!
//! The scraper only needs "GET this URL, give me the body". That capability
//! is the [`Fetcher`] trait so the event store can run against a canned
//! document in tests; [`HttpFetcher`] is the real blocking client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;

/// Blocking page download.
pub trait Fetcher: Send + Sync {
    /// Download `url` and return the raw response body.
    ///
    /// Network errors, timeouts and non-success statuses are
    /// [`AppError::Transport`]. No retries.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// [`Fetcher`] backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher sending the configured headers and timeout.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(build_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                log::error!("Error making request to {}: {}", url, e);
                AppError::transport(url, e)
            })?;

        let body = response
            .bytes()
            .map_err(|e| AppError::transport(url, e))?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

/// Build the browser-like header set sent with every request.
pub fn build_headers(config: &FetcherConfig) -> Result<HeaderMap> {
    let entries = [
        (header::USER_AGENT, &config.user_agent),
        (header::ACCEPT, &config.accept),
        (header::ACCEPT_LANGUAGE, &config.accept_language),
        (header::ACCEPT_ENCODING, &config.accept_encoding),
        (header::CONNECTION, &config.connection),
        (
            header::UPGRADE_INSECURE_REQUESTS,
            &config.upgrade_insecure_requests,
        ),
    ];

    let mut headers = HeaderMap::new();
    for (name, value) in entries {
        headers.insert(name.clone(), header_value(&name, value)?);
    }
    Ok(headers)
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::config(format!("Invalid value for header {name}: {e}")))
}
