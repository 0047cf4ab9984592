//! Application configuration structures.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Listing page location and link conventions
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP request settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Result caching
    #[serde(default)]
    pub cache: CacheConfig,

    /// Label patterns for the labelled event fields
    #[serde(default)]
    pub labels: LabelConfig,

    /// Participation markers used by filtering
    #[serde(default)]
    pub filter: FilterConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.source.url)
            .map_err(|e| AppError::validation(format!("source.url is invalid: {e}")))?;
        if self.source.event_link_pattern.trim().is_empty() {
            return Err(AppError::validation("source.event_link_pattern is empty"));
        }
        Regex::new(&self.source.event_link_pattern)
            .map_err(|e| AppError::pattern(&self.source.event_link_pattern, e))?;
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        for (name, pattern) in self.labels.entries() {
            if pattern.trim().is_empty() {
                return Err(AppError::validation(format!("labels.{name} is empty")));
            }
            Regex::new(pattern).map_err(|e| AppError::pattern(pattern, e))?;
        }
        if self.filter.online_marker.trim().is_empty()
            || self.filter.in_person_marker.trim().is_empty()
        {
            return Err(AppError::validation("filter markers must not be empty"));
        }
        Ok(())
    }
}

/// Where the listing lives and how event links look.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Listing page URL, also the base for relative links
    #[serde(default = "defaults::source_url")]
    pub url: String,

    /// Regex matched against anchor hrefs to recognise event pages
    #[serde(default = "defaults::event_link_pattern")]
    pub event_link_pattern: String,

    /// Element ids tried, in order, for the body content container
    #[serde(default = "defaults::content_ids")]
    pub content_ids: Vec<String>,

    /// Element classes tried after the ids
    #[serde(default = "defaults::content_classes")]
    pub content_classes: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: defaults::source_url(),
            event_link_pattern: defaults::event_link_pattern(),
            content_ids: defaults::content_ids(),
            content_classes: defaults::content_classes(),
        }
    }
}

/// HTTP request headers and timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    #[serde(default = "defaults::accept")]
    pub accept: String,

    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    #[serde(default = "defaults::accept_encoding")]
    pub accept_encoding: String,

    #[serde(default = "defaults::connection")]
    pub connection: String,

    #[serde(default = "defaults::upgrade_insecure_requests")]
    pub upgrade_insecure_requests: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            accept_encoding: defaults::accept_encoding(),
            connection: defaults::connection(),
            upgrade_insecure_requests: defaults::upgrade_insecure_requests(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a scraped result stays fresh
    #[serde(default = "defaults::ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::ttl(),
        }
    }
}

/// Label regexes as they appear on the listing page.
///
/// Each pattern is matched against single text nodes. Defaults are anchored
/// so titles such as "Wiki Loves Africa" are not taken for a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "defaults::label_participation")]
    pub participation: String,

    #[serde(default = "defaults::label_country")]
    pub country: String,

    #[serde(default = "defaults::label_event_types")]
    pub event_types: String,

    #[serde(default = "defaults::label_wiki")]
    pub wiki: String,

    /// "Mada" on the Swahili listing
    #[serde(default = "defaults::label_topics")]
    pub topics: String,

    /// "Waandaaji" on the Swahili listing
    #[serde(default = "defaults::label_organizers")]
    pub organizers: String,
}

impl LabelConfig {
    /// Label patterns keyed by their config name.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("participation", self.participation.as_str()),
            ("country", self.country.as_str()),
            ("event_types", self.event_types.as_str()),
            ("wiki", self.wiki.as_str()),
            ("topics", self.topics.as_str()),
            ("organizers", self.organizers.as_str()),
        ]
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            participation: defaults::label_participation(),
            country: defaults::label_country(),
            event_types: defaults::label_event_types(),
            wiki: defaults::label_wiki(),
            topics: defaults::label_topics(),
            organizers: defaults::label_organizers(),
        }
    }
}

/// Substrings that identify participation modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Present in online participation text ("online")
    #[serde(default = "defaults::online_marker")]
    pub online_marker: String,

    /// Present in in-person participation text ("face to face")
    #[serde(default = "defaults::in_person_marker")]
    pub in_person_marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            online_marker: defaults::online_marker(),
            in_person_marker: defaults::in_person_marker(),
        }
    }
}

/// Log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Source defaults
    pub fn source_url() -> String {
        "https://sw.wikipedia.org/wiki/Maalum:AllEvents".into()
    }
    pub fn event_link_pattern() -> String {
        "/wiki/Event:".into()
    }
    pub fn content_ids() -> Vec<String> {
        vec!["bodyContent".into()]
    }
    pub fn content_classes() -> Vec<String> {
        vec!["mw-body-content".into()]
    }

    // Fetcher defaults
    pub fn user_agent() -> String {
        "WikimediaEventsApp/1.0 (Educational Purpose)".into()
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".into()
    }
    pub fn accept_language() -> String {
        "sw,en-US,en;q=0.5".into()
    }
    pub fn accept_encoding() -> String {
        "gzip, deflate".into()
    }
    pub fn connection() -> String {
        "keep-alive".into()
    }
    pub fn upgrade_insecure_requests() -> String {
        "1".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Cache defaults
    pub fn ttl() -> u64 {
        300
    }

    // Label defaults
    pub fn label_participation() -> String {
        r"^\s*Participation options\s*:?\s*$".into()
    }
    pub fn label_country() -> String {
        r"^\s*Country\s*:?\s*$".into()
    }
    pub fn label_event_types() -> String {
        r"^\s*Event types\s*:?\s*$".into()
    }
    pub fn label_wiki() -> String {
        r"^\s*Wiki\s*:?\s*$".into()
    }
    pub fn label_topics() -> String {
        r"^\s*Mada\s*:?\s*$".into()
    }
    pub fn label_organizers() -> String {
        r"^\s*Waandaaji\s*:?\s*$".into()
    }

    // Filter defaults
    pub fn online_marker() -> String {
        "mtandaoni".into()
    }
    pub fn in_person_marker() -> String {
        "ana kwa ana".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}
