//! LeadKit - business lead extraction from company websites
//!
//! This crate fetches a single web page and turns it into a [`LeadRecord`]:
//! company name, title, description, contact details, logo, favicon, social
//! profiles, contact page, keywords and language.
//!
//! ## Extraction
//!
//! Every field is produced by an ordered fallback chain over the parsed HTML
//! (structured metadata first, document content last). Extraction never
//! fails: a field nothing matched keeps its default.
//!
//! ## Fetcher System
//!
//! The [`LeadScraper`] talks to a [`Fetcher`]. [`HttpFetcher`] is the
//! built-in reqwest implementation; tests and embedders can inject their
//! own through [`LeadScraperBuilder::fetcher`].
//!
//! ## Storage
//!
//! Leads are persisted through the [`LeadStore`] trait. [`SqliteStore`] keeps
//! them in a local SQLite file; [`MemoryStore`] keeps them in process.

pub mod client;
mod error;
pub mod extract;
pub mod fetchers;
pub mod normalize;
mod pipeline;
pub mod store;
mod types;

pub use client::{scrape, scrape_with_options, FetchOptions};
pub use error::{FetchError, LeadError, StoreError};
pub use extract::{extract, SocialLinks};
pub use fetchers::{Fetcher, HttpFetcher};
pub use pipeline::{LeadScraper, LeadScraperBuilder};
pub use store::{LeadStore, MemoryStore, SqliteStore};
pub use types::{
    FetchedPage, LeadRecord, LeadSubmission, StoredLead, DEFAULT_LANGUAGE, DESCRIPTION_SENTINEL,
    TITLE_SENTINEL,
};

use std::time::Duration;

/// Default User-Agent string (desktop Chrome)
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
