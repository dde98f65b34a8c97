//! Domain layer for the job board client.
//!
//! Core types with no knowledge of HTTP, timers or rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`job`]: Job posting model, job types and the creation payload
//! - [`filter`]: Listing filters and sort options
//! - [`page`]: Paged listing results

pub mod error;
pub mod filter;
pub mod job;
pub mod page;

pub use error::{JobBoardError, Result};
pub use filter::{FilterKey, FilterState, SortBy, SortOrder};
pub use job::{JobRecord, JobType, NewJob};
pub use page::{PagedResult, DEFAULT_PER_PAGE};
