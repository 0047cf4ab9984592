// src/models/mod.rs

//! Domain models for the events scraper.

mod config;
mod event;

pub use config::{
    CacheConfig, Config, FetcherConfig, FilterConfig, LabelConfig, LoggingConfig, SourceConfig,
};
pub use event::{Event, UNKNOWN, UNKNOWN_TITLE, event_id, split_date_range};
