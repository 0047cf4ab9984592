// src/models/event.rs

//! Event data structure.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Placeholder for scalar fields missing from the source markup.
pub const UNKNOWN: &str = "Unknown";

/// Title given to fragments without a usable anchor.
pub const UNKNOWN_TITLE: &str = "Unknown Event";

/// An event scraped from the listing page.
///
/// Every field is always populated; missing values hold [`UNKNOWN`] or an
/// empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// Event title
    pub title: String,

    /// Absolute URL of the event page (empty when no anchor was found)
    pub link: String,

    /// Start of the date range
    pub start_date: String,

    /// End of the date range
    pub end_date: String,

    /// Date range as written on the page
    pub date_range: String,

    /// Online / in-person participation text
    pub participation_option: String,

    /// Country text
    pub country: String,

    /// Event types, in page order
    pub event_types: Vec<String>,

    /// Wiki the event belongs to
    pub wiki: String,

    /// Topics, in page order
    pub topics: Vec<String>,

    /// Organizer names
    pub organizers: Vec<String>,

    /// Identifier derived from the title, see [`event_id`]
    pub id: u32,
}

impl Event {
    /// Create an event with every optional field set to its placeholder.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: event_id(&title),
            title,
            link: link.into(),
            start_date: UNKNOWN.to_string(),
            end_date: UNKNOWN.to_string(),
            date_range: UNKNOWN.to_string(),
            participation_option: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            event_types: Vec::new(),
            wiki: UNKNOWN.to_string(),
            topics: Vec::new(),
            organizers: Vec::new(),
        }
    }

    /// True when extraction could not find a title.
    pub fn has_unknown_title(&self) -> bool {
        self.title == UNKNOWN_TITLE
    }

    /// Set the date fields from a raw range such as `12 May 2024 – 15 May 2024`.
    pub fn set_date_range(&mut self, raw: &str) {
        let raw = raw.trim();
        let (start, end) = split_date_range(raw);
        self.start_date = start;
        self.end_date = end;
        self.date_range = raw.to_string();
    }
}

/// Split a date range on the en dash. Without a dash both ends are the whole text.
pub fn split_date_range(raw: &str) -> (String, String) {
    match raw.split_once('\u{2013}') {
        Some((start, end)) => (start.trim().to_string(), end.trim().to_string()),
        None => (raw.trim().to_string(), raw.trim().to_string()),
    }
}

/// Derive the event id from its title.
///
/// First four bytes of SHA-256 over the UTF-8 title, big endian, masked to
/// 31 bits. Stable across runs and platforms; distinct titles may collide.
pub fn event_id(title: &str) -> u32 {
    let digest = Sha256::digest(title.as_bytes());
    let bytes = [digest[0], digest[1], digest[2], digest[3]];
    u32::from_be_bytes(bytes) & 0x7FFF_FFFF
}
