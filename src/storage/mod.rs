//! In-memory storage for scraped results.
//!
//! Nothing is persisted. The only state is the last successful scrape and
//! its timestamp, held in a [`TtlCache`] owned by the event store.

pub mod cache;

pub use cache::{CacheEntry, TtlCache};
