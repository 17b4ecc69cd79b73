//! Pipeline entry points for go2web operations.
//!
//! - `run_fetch`: Fetch a page (cache first) and render headings and links
//! - `run_search`: Query the search engine and list result URLs
//! - `run_operation`: Either of the above between cache load and save

pub mod fetch;
mod run;
pub mod search;

pub use fetch::run_fetch;
pub use run::{Operation, run_operation};
pub use search::run_search;
