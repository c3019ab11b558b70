//! Search query strings for job-board result pages.

mod search;

pub use search::{SearchParams, SearchQuery};
