//! View model types representing renderable UI state.
//!
//! View models are computed from application state and consumed by the renderer or
//! by any other front end. They contain no business logic, only display-ready data.
//!
//! # Architecture
//!
//! [`JobListViewModel`] is produced by `JobListState::compute_viewmodel()` and
//! published by the controller after every state change. It is the observable
//! half of the list contract: `{jobs, loading, error, delete_error, pages,
//! current_page}` plus a few derived flags.

use crate::domain::FilterState;

/// Complete view model for the job list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListViewModel {
    /// Cards for the jobs currently held in state, in backend order.
    pub jobs: Vec<JobCard>,

    /// A listing request is outstanding.
    pub loading: bool,

    /// Listing failure message, if the last applied fetch failed.
    pub error: Option<String>,

    /// Deletion failure message, shown independently of `error`.
    pub delete_error: Option<String>,

    /// Total pages under the current filter, as last reported by the backend.
    pub pages: u32,

    /// 1-indexed page cursor.
    pub current_page: u32,

    /// Pagination controls are only shown when there is more than one page.
    pub show_pagination: bool,

    /// Placeholder cards are shown while the first results are loading.
    pub show_skeleton: bool,

    /// Filter values as currently edited.
    pub filters: FilterState,

    /// Message for a finished, empty listing.
    pub empty_state: Option<EmptyState>,

    /// Ids with a delete request in flight, ascending. Their cards are already
    /// removed from `jobs`; front ends use this to keep delete controls busy.
    pub deleting: Vec<i64>,
}

/// Display information for a single job in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Job type label, e.g. `Full-time`.
    pub job_type: String,
    /// Posting date formatted as `MMM d, yyyy`.
    pub posted: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Display information for the single-job view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailViewModel {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub posted: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    /// Last modification, when the backend reports it.
    pub updated: Option<String>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No jobs found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
