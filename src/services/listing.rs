// src/services/listing.rs

//! Filtered listing for presentation.
//!
//! A refresh failure never reaches the caller: the listing falls back to the
//! last cached events, or none, and carries an error notice instead.

use serde::Serialize;

use crate::models::{Event, FilterConfig};
use crate::services::EventStore;
use crate::services::filter::{EventFilter, Facets};
use crate::utils::http::Fetcher;

/// What a listing view shows.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Events passing the filter
    pub events: Vec<Event>,
    /// Number of filtered events
    pub total: usize,
    /// Filter choices over the unfiltered events
    pub facets: Facets,
    /// Error text when fresh data could not be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// JSON body of the events API: `{ "events": [...], "total": n }`.
#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse<'a> {
    pub events: &'a [Event],
    pub total: usize,
}

impl Listing {
    /// The API view of this listing.
    pub fn response(&self) -> EventsResponse<'_> {
        EventsResponse {
            events: &self.events,
            total: self.total,
        }
    }

    fn build(
        all: &[Event],
        filter: &EventFilter,
        markers: &FilterConfig,
        notice: Option<String>,
    ) -> Self {
        let events = filter.apply(all, markers);
        Self {
            total: events.len(),
            facets: Facets::collect(all),
            events,
            notice,
        }
    }
}

/// Load events through the store and apply `filter`.
pub fn load_listing<F: Fetcher>(
    store: &EventStore<F>,
    filter: &EventFilter,
    markers: &FilterConfig,
) -> Listing {
    match store.get_all_events() {
        Ok(events) => Listing::build(&events, filter, markers, None),
        Err(e) => {
            log::error!("Error loading events: {}", e);
            let notice = Some(format!("Error loading events: {e}"));
            match store.cached_events() {
                Some(events) => Listing::build(&events, filter, markers, notice),
                None => Listing::build(&[], filter, markers, notice),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::tests::{PAGE, StubFetcher, store_with};
    use std::sync::Arc;

    #[test]
    fn test_listing_filters_and_collects_facets() {
        let store = store_with(300, Arc::new(StubFetcher::new(PAGE)));
        let filter = EventFilter::from_params(Some("Kenya"), None, None, None);

        let listing = load_listing(&store, &filter, &FilterConfig::default());
        assert_eq!(listing.total, 1);
        assert_eq!(listing.events[0].title, "Foo Bar");
        assert_eq!(listing.facets.countries, vec!["Kenya", "Tanzania"]);
        assert!(listing.notice.is_none());
    }

    #[test]
    fn test_listing_falls_back_to_stale_cache() {
        let fetcher = Arc::new(StubFetcher::new(PAGE));
        let store = store_with(0, Arc::clone(&fetcher));
        store.get_all_events().unwrap();
        fetcher.fail(true);

        let listing = load_listing(&store, &EventFilter::default(), &FilterConfig::default());
        assert_eq!(listing.total, 2);
        assert!(listing.notice.as_deref().unwrap().starts_with("Error loading events"));
    }

    #[test]
    fn test_listing_empty_with_notice_when_nothing_cached() {
        let fetcher = Arc::new(StubFetcher::new(PAGE));
        fetcher.fail(true);
        let store = store_with(300, fetcher);

        let listing = load_listing(&store, &EventFilter::default(), &FilterConfig::default());
        assert_eq!(listing.total, 0);
        assert!(listing.events.is_empty());
        assert!(listing.notice.is_some());
    }

    #[test]
    fn test_response_shape() {
        let store = store_with(300, Arc::new(StubFetcher::new(PAGE)));
        let filter = EventFilter::from_params(None, None, Some("online"), None);
        let listing = load_listing(&store, &filter, &FilterConfig::default());

        let value = serde_json::to_value(listing.response()).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["events"][0]["title"], "Foo Bar");
        assert_eq!(value["events"][0]["event_types"][1], "Conference");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
