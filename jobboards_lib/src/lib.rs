//! Library layer for the job-board crawler: selector-cascade extraction,
//! per-board strategy profiles, collection runs, and aggregation helpers.
//!
//! Builds on the `jobboards_api` fetch layer. Nothing here keeps global
//! state; callers pass a [`collect::CollectContext`] into every run.

pub mod aggregate;
pub mod collect;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod profiles;
pub mod settings;

pub use jobboards_api;
pub use jobboards_api::{FetchedPage, Fetcher, JobRecord, RequestConfig, RetryPolicy, JOB_FIELDS};

pub use collect::{collect, CollectContext, CollectStats, Collection, Target};
pub use error::JobsError;
pub use extract::{Card, Field, FieldRule};
pub use profiles::{route_profile, GenericProfile, JobProfile, StepstoneProfile};
pub use settings::{InputOverrides, Settings};
