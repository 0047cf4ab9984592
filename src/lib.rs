// src/lib.rs

//! Wikimedia events scraper library.
//!
//! Fetches the events listing page, extracts typed [`models::Event`]
//! records and serves them through a TTL-cached [`services::EventStore`].

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
