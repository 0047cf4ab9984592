// src/services/filter.rs

//! Event filtering and filter facets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Event, FilterConfig, UNKNOWN};

/// Value that disables a criterion.
pub const ALL: &str = "all";

/// Participation mode requested by a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participation {
    /// Online marker present
    Online,
    /// In-person marker present and online marker absent
    InPerson,
    /// Both markers present
    Hybrid,
    /// Exact participation text
    Exact(String),
}

impl Participation {
    /// Parse a filter value; `None` for an empty value or [`ALL`].
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "" | ALL => None,
            "online" => Some(Self::Online),
            "in_person" => Some(Self::InPerson),
            "hybrid" => Some(Self::Hybrid),
            other => Some(Self::Exact(other.to_string())),
        }
    }

    fn matches(&self, text: &str, markers: &FilterConfig) -> bool {
        let lower = text.to_lowercase();
        let online = lower.contains(&markers.online_marker.to_lowercase());
        let in_person = lower.contains(&markers.in_person_marker.to_lowercase());
        match self {
            Self::Online => online,
            Self::InPerson => in_person && !online,
            Self::Hybrid => online && in_person,
            Self::Exact(expected) => text == expected,
        }
    }
}

/// Criteria applied to an event list. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub country: Option<String>,
    pub event_type: Option<String>,
    pub participation: Option<Participation>,
    pub search: Option<String>,
}

impl EventFilter {
    /// Build a filter from raw query values, treating [`ALL`] and empty as unset.
    pub fn from_params(
        country: Option<&str>,
        event_type: Option<&str>,
        participation: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            country: criterion(country),
            event_type: criterion(event_type),
            participation: participation.and_then(Participation::parse),
            search: search
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
        }
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a single event passes every set criterion.
    pub fn matches(&self, event: &Event, markers: &FilterConfig) -> bool {
        if let Some(country) = &self.country {
            if &event.country != country {
                return false;
            }
        }
        if let Some(event_type) = &self.event_type {
            if !event.event_types.contains(event_type) {
                return false;
            }
        }
        if let Some(participation) = &self.participation {
            if !participation.matches(&event.participation_option, markers) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let search = search.to_lowercase();
            let in_title = event.title.to_lowercase().contains(&search);
            let in_topics = event.topics.join(" ").to_lowercase().contains(&search);
            if !in_title && !in_topics {
                return false;
            }
        }
        true
    }

    /// Matching events, in input order.
    pub fn apply(&self, events: &[Event], markers: &FilterConfig) -> Vec<Event> {
        events
            .iter()
            .filter(|event| self.matches(event, markers))
            .cloned()
            .collect()
    }
}

fn criterion(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(String::from)
}

/// Distinct values available for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub countries: Vec<String>,
    pub event_types: Vec<String>,
    pub participation_options: Vec<String>,
}

impl Facets {
    /// Sorted distinct values, without placeholders.
    pub fn collect(events: &[Event]) -> Self {
        let known = |value: &&String| !value.is_empty() && value.as_str() != UNKNOWN;

        let countries: BTreeSet<&String> =
            events.iter().map(|e| &e.country).filter(known).collect();
        let event_types: BTreeSet<&String> = events
            .iter()
            .flat_map(|e| &e.event_types)
            .filter(known)
            .collect();
        let participation: BTreeSet<&String> = events
            .iter()
            .map(|e| &e.participation_option)
            .filter(known)
            .collect();

        Self {
            countries: countries.into_iter().cloned().collect(),
            event_types: event_types.into_iter().cloned().collect(),
            participation_options: participation.into_iter().cloned().collect(),
        }
    }
}
