//! Data types shared by the crawler crates.

mod job;
mod request;

pub use job::{JobRecord, JOB_FIELDS};
pub use request::RequestConfig;
