//! Service layer for the events scraper.
//!
//! This module contains the business logic for:
//! - Fragment extraction (`EventExtractor`)
//! - Page parsing with fallback (`PageParser`)
//! - The cached event store facade (`EventStore`)
//! - Filtering and listings for presentation (`EventFilter`, `Listing`)

pub mod extractor;
pub mod filter;
pub mod listing;
pub mod parser;
pub mod store;

pub use extractor::{EventExtractor, Field, FieldRule, FieldValue, SplitStrategy};
pub use filter::{EventFilter, Facets, Participation};
pub use listing::{EventsResponse, Listing, load_listing};
pub use parser::PageParser;
pub use store::EventStore;
