// src/pipeline/watch.rs

//! Periodic refresh loop.

use std::thread;
use std::time::Duration;

use crate::services::EventStore;
use crate::utils::http::Fetcher;

/// Counts from a watch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchStats {
    pub rounds: usize,
    pub failures: usize,
    pub last_count: Option<usize>,
}

/// Read the event list every `interval`, `rounds` times (forever if `None`,
/// nothing if `Some(0)`).
///
/// The store's TTL decides whether a round refetches. Failures are logged
/// and counted; the loop keeps going.
pub fn run_watch<F: Fetcher>(
    store: &EventStore<F>,
    interval: Duration,
    rounds: Option<usize>,
) -> WatchStats {
    let mut stats = WatchStats::default();

    while rounds.is_none_or(|limit| stats.rounds < limit) {
        if stats.rounds > 0 {
            thread::sleep(interval);
        }
        stats.rounds += 1;
        match store.get_all_events() {
            Ok(events) => {
                stats.last_count = Some(events.len());
                log::info!(
                    "[round {}] {} events (scraped at {})",
                    stats.rounds,
                    events.len(),
                    store
                        .last_fetched()
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            Err(e) => {
                stats.failures += 1;
                log::warn!("[round {}] refresh failed: {}", stats.rounds, e);
            }
        }
    }

    stats
}
