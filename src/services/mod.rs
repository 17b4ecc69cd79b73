//! Service layer for go2web.
//!
//! This module contains the business logic for:
//! - Page fetching with manual redirects (`Fetcher`)
//! - Search engine queries (`SearchClient`)
//! - Pattern-based HTML extraction (`extractor`)

pub mod extractor;
mod fetcher;
mod search;

pub use fetcher::Fetcher;
pub use search::SearchClient;
