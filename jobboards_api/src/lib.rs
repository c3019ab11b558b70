//! HTTP layer for the job-board crawler: page fetching with retries,
//! request configuration, search query strings, and the `JobRecord` type.

mod client;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::{FetchedPage, Fetcher, RetryPolicy, FAILED_STATUS};
pub use self::errors::Error;
pub use self::query::{SearchParams, SearchQuery};
pub use self::types::{JobRecord, RequestConfig, JOB_FIELDS};
pub use self::user_agent::{pick_user_agent, DEFAULT_USER_AGENT};
