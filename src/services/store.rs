// src/services/store.rs

//! Event store facade.
//!
//! The single entry point for callers: fetch the listing, parse it and
//! keep the result for the cache TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::{AppError, Result};
use crate::models::{Config, Event};
use crate::services::PageParser;
use crate::storage::TtlCache;
use crate::utils::http::{Fetcher, HttpFetcher};

/// Cached access to the scraped event list.
///
/// The cache lock is held across the whole check-fetch-store sequence, so
/// concurrent callers during a miss wait for the one refresh in flight
/// instead of fetching again.
pub struct EventStore<F: Fetcher> {
    fetcher: F,
    parser: PageParser,
    source_url: String,
    cache: Mutex<TtlCache<Vec<Event>>>,
}

impl EventStore<HttpFetcher> {
    /// Build a store with the real HTTP client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        Self::with_fetcher(fetcher, config)
    }
}

impl<F: Fetcher> EventStore<F> {
    /// Build a store around any fetcher, using the configured source and TTL.
    pub fn with_fetcher(fetcher: F, config: &Config) -> Result<Self> {
        let parser = PageParser::new(config)?;
        let cache = TtlCache::new(Duration::from_secs(config.cache.ttl_secs));
        Ok(Self::new(fetcher, parser, &config.source.url, cache))
    }

    /// Assemble a store from its parts.
    pub fn new(
        fetcher: F,
        parser: PageParser,
        source_url: impl Into<String>,
        cache: TtlCache<Vec<Event>>,
    ) -> Self {
        Self {
            fetcher,
            parser,
            source_url: source_url.into(),
            cache: Mutex::new(cache),
        }
    }

    /// All events, from cache while fresh, otherwise freshly scraped.
    ///
    /// A failed scrape leaves the previous cache entry untouched and is
    /// returned as [`AppError::Scrape`]. Stale data is never served here.
    pub fn get_all_events(&self) -> Result<Arc<Vec<Event>>> {
        let mut cache = self.cache.lock();

        if let Some(events) = cache.get_fresh(Instant::now()) {
            log::info!("Returning cached events data");
            return Ok(events);
        }

        log::info!("Scraping events from {}", self.source_url);
        let events = self.scrape().map_err(|e| {
            log::error!("Error scraping events: {}", e);
            AppError::scrape(e)
        })?;

        log::info!("Successfully scraped {} events", events.len());
        Ok(cache.store(events, Instant::now()))
    }

    /// The first event with `id`.
    ///
    /// Failures are logged and reported as `None`, the same as a missing
    /// id. Use [`Self::try_get_event_by_id`] to tell them apart.
    pub fn get_event_by_id(&self, id: u32) -> Option<Event> {
        self.try_get_event_by_id(id).unwrap_or_else(|e| {
            log::error!("Error getting event by ID {}: {}", id, e);
            None
        })
    }

    /// The first event with `id`, propagating scrape failures.
    pub fn try_get_event_by_id(&self, id: u32) -> Result<Option<Event>> {
        let events = self.get_all_events()?;
        Ok(events.iter().find(|event| event.id == id).cloned())
    }

    /// Forget the cached result; the next read always refetches.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Clear the cache and scrape again.
    pub fn refresh(&self) -> Result<Arc<Vec<Event>>> {
        self.clear_cache();
        self.get_all_events()
    }

    /// The last successful result, even if stale.
    pub fn cached_events(&self) -> Option<Arc<Vec<Event>>> {
        self.cache
            .lock()
            .entry()
            .map(|entry| Arc::clone(&entry.value))
    }

    /// When the cached result was scraped.
    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.cache.lock().entry().map(|entry| entry.fetched_at_utc)
    }

    /// Listing page URL.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    fn scrape(&self) -> Result<Vec<Event>> {
        let body = self.fetcher.fetch(&self.source_url)?;
        let html = String::from_utf8_lossy(&body);
        Ok(self.parser.parse(&html))
    }
}
