//! Worker message types exchanged between the list state machine and the backend.
//!
//! This module defines the request and response protocol between
//! [`crate::app::handle_event`] and [`super::JobWorker`]. Every listing request
//! carries a sequence number so the state machine can tell a stale response from
//! the one it is waiting for.

use crate::domain::{FilterState, PagedResult};
use serde::{Deserialize, Serialize};

/// Requests emitted by the state machine for the worker to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read one page of the listing.
    FetchPage {
        /// Monotonic request number assigned by the list state.
        seq: u64,

        /// Filter snapshot taken when the request was issued.
        filters: FilterState,

        /// 1-indexed page to read.
        page: u32,

        /// Page length.
        per_page: u32,
    },

    /// Delete one posting.
    DeleteJob {
        /// Id of the posting to delete.
        id: i64,
    },
}

impl WorkerMessage {
    /// Builds a page request.
    #[must_use]
    pub fn fetch_page(seq: u64, filters: FilterState, page: u32, per_page: u32) -> Self {
        Self::FetchPage {
            seq,
            filters,
            page,
            per_page,
        }
    }

    /// Builds a delete request.
    #[must_use]
    pub const fn delete_job(id: i64) -> Self {
        Self::DeleteJob { id }
    }
}

/// Results sent back from the worker.
///
/// Failures carry a message that is ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A page was read successfully.
    PageLoaded {
        /// Sequence number of the request this answers.
        seq: u64,

        /// The page contents and total page count.
        result: PagedResult,
    },

    /// A page read failed.
    PageFailed {
        /// Sequence number of the request this answers.
        seq: u64,

        /// Human-readable error message.
        message: String,
    },

    /// The backend confirmed a deletion.
    JobDeleted {
        /// Id of the deleted posting.
        id: i64,
    },

    /// The backend refused or the request failed.
    DeleteFailed {
        /// Id of the posting that is still present.
        id: i64,

        /// Human-readable error message.
        message: String,
    },
}
