//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! expiry and worker responses, translating them into state changes and action
//! sequences. It is the whole list workflow in one deterministic function:
//! filters, pagination, request sequencing and optimistic deletion.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the controller's public methods, the debounce timer or the worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on [`JobListState`]
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Listing**: `Load`, `PageSelected`
//! - **Filters**: `FilterChanged`, `FilterCleared`, `DebounceElapsed`
//! - **Deletion**: `DeleteConfirmed`
//! - **Errors**: `DismissError`, `DismissDeleteError`
//! - **Worker**: `Worker` with typed response variants
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::{handle_event, Action, Event, JobListState};
//!
//! let mut state = JobListState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Load)?;
//! assert!(matches!(actions[..], [Action::PostToWorker(_)]));
//! # Ok::<(), jobboard::domain::JobBoardError>(())
//! ```

use crate::app::{Action, JobListState};
use crate::domain::error::Result;
use crate::domain::page::clamp_page;
use crate::domain::FilterKey;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, the debounce timer, or worker responses.
///
/// The handler processes these sequentially, so state transitions are
/// deterministic for a given event order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Fetches the current page with the current filters.
    Load,

    /// Updates one filter value and arms the debounce timer.
    ///
    /// The page is not touched yet; it is reset when the timer fires.
    FilterChanged {
        /// Field being edited.
        key: FilterKey,
        /// New raw value.
        value: String,
    },

    /// Resets one filter to its default and arms the debounce timer.
    FilterCleared {
        /// Field being cleared.
        key: FilterKey,
    },

    /// The quiet window after the last filter edit has passed.
    ///
    /// Resets the page to 1 and fetches once with the latest filter values.
    DebounceElapsed,

    /// Jumps to a page immediately, bypassing the debounce window.
    PageSelected(u32),

    /// The user confirmed deletion of a job.
    DeleteConfirmed {
        /// Id of the job to delete.
        id: i64,
    },

    /// Clears the listing error banner.
    DismissError,

    /// Clears the deletion error banner.
    DismissDeleteError,

    /// Wraps a response from the worker.
    Worker(WorkerResponse),
}

/// Processes an event, mutates list state, and returns actions to execute.
///
/// The returned flag reports whether observable state changed, so the caller can
/// skip publishing an identical view model.
///
/// # Errors
///
/// Returns [`crate::domain::JobBoardError::Validation`] when `FilterChanged`
/// carries an unknown job type or sort value. State is left untouched in that case.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut JobListState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Load => {
            let fetch = state.begin_fetch();
            Ok((true, vec![Action::PostToWorker(fetch)]))
        }
        Event::FilterChanged { key, value } => {
            if !state.filters.set(*key, value)? {
                tracing::trace!(filter = key.as_str(), "filter unchanged, skipping debounce");
                return Ok((false, vec![]));
            }
            tracing::debug!(filter = key.as_str(), value = %value, "filter changed");
            Ok((true, vec![Action::ScheduleDebounce]))
        }
        Event::FilterCleared { key } => {
            if !state.filters.clear(*key) {
                return Ok((false, vec![]));
            }
            tracing::debug!(filter = key.as_str(), "filter cleared");
            Ok((true, vec![Action::ScheduleDebounce]))
        }
        Event::DebounceElapsed => {
            state.current_page = 1;
            let fetch = state.begin_fetch();
            Ok((true, vec![Action::PostToWorker(fetch)]))
        }
        Event::PageSelected(page) => {
            let page = clamp_page(*page, state.pages);
            tracing::debug!(requested = page, pages = state.pages, "page selected");
            state.current_page = page;
            let fetch = state.begin_fetch();
            Ok((true, vec![Action::PostToWorker(fetch)]))
        }
        Event::DeleteConfirmed { id } => {
            if !state.begin_delete(*id) {
                tracing::debug!(job_id = id, "delete already in flight, ignoring");
                return Ok((false, vec![]));
            }
            tracing::debug!(job_id = id, remaining = state.jobs.len(), "job removed optimistically");
            Ok((true, vec![Action::PostToWorker(WorkerMessage::delete_job(*id))]))
        }
        Event::DismissError => Ok((state.error.take().is_some(), vec![])),
        Event::DismissDeleteError => Ok((state.delete_error.take().is_some(), vec![])),
        Event::Worker(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(state: &mut JobListState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::PageLoaded { seq, result } => {
            if !state.accept_response(*seq) {
                tracing::debug!(seq, "discarding stale page");
                return Ok((false, vec![]));
            }

            state.error = None;
            state.replace_jobs(&result.jobs);
            state.pages = result.pages;

            if !state.is_latest(*seq) {
                return Ok((true, vec![]));
            }

            if result.pages == 0 {
                state.current_page = 1;
            } else if result.pages < state.current_page {
                tracing::debug!(
                    current_page = state.current_page,
                    pages = result.pages,
                    "page out of range, correcting"
                );
                state.current_page = result.pages;
                let fetch = state.begin_fetch();
                return Ok((true, vec![Action::PostToWorker(fetch)]));
            }
            Ok((true, vec![]))
        }
        WorkerResponse::PageFailed { seq, message } => {
            if !state.accept_response(*seq) {
                tracing::debug!(seq, "discarding stale failure");
                return Ok((false, vec![]));
            }
            // Previously displayed jobs stay visible under the error banner.
            state.error = Some(message.clone());
            Ok((true, vec![]))
        }
        WorkerResponse::JobDeleted { id } => {
            if state.finish_delete(*id) && state.current_page > 1 {
                state.current_page -= 1;
                tracing::debug!(job_id = id, page = state.current_page, "page emptied, moving back");
            }
            let fetch = state.begin_fetch();
            Ok((true, vec![Action::PostToWorker(fetch)]))
        }
        WorkerResponse::DeleteFailed { id, message } => {
            state.finish_delete(*id);
            state.delete_error = Some(message.clone());
            tracing::debug!(job_id = id, "delete failed, resynchronising");
            let fetch = state.begin_fetch();
            Ok((true, vec![Action::PostToWorker(fetch)]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobRecord, JobType, PagedResult};
    use chrono::Utc;

    fn job(id: i64) -> JobRecord {
        JobRecord {
            id,
            title: format!("Job {id}"),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: JobType::FullTime,
            description: None,
            url: None,
            tags: vec![],
            posting_date: Utc::now(),
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(seq: u64, ids: &[i64], pages: u32) -> Event {
        Event::Worker(WorkerResponse::PageLoaded {
            seq,
            result: PagedResult {
                jobs: ids.iter().copied().map(job).collect(),
                pages,
                ..PagedResult::default()
            },
        })
    }

    fn fetch_of(actions: &[Action]) -> (u64, u32) {
        match actions {
            [Action::PostToWorker(WorkerMessage::FetchPage { seq, page, .. })] => (*seq, *page),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    #[test]
    fn filter_edits_only_arm_the_timer() {
        let mut state = JobListState::default();
        state.current_page = 3;

        let (changed, actions) = handle_event(
            &mut state,
            &Event::FilterChanged {
                key: FilterKey::Title,
                value: "Eng".into(),
            },
        )
        .unwrap();
        assert!(changed);
        assert_eq!(actions, vec![Action::ScheduleDebounce]);
        assert_eq!(state.current_page, 3);

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert_eq!(fetch_of(&actions).1, 1);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn unchanged_filter_is_a_no_op() {
        let mut state = JobListState::default();
        let (changed, actions) = handle_event(
            &mut state,
            &Event::FilterChanged {
                key: FilterKey::SortOrder,
                value: "desc".into(),
            },
        )
        .unwrap();
        assert!(!changed);
        assert!(actions.is_empty());

        let (changed, _) = handle_event(&mut state, &Event::FilterCleared { key: FilterKey::Title }).unwrap();
        assert!(!changed);
    }

    #[test]
    fn invalid_filter_value_is_rejected() {
        let mut state = JobListState::default();
        let result = handle_event(
            &mut state,
            &Event::FilterChanged {
                key: FilterKey::JobType,
                value: "Freelance".into(),
            },
        );
        assert!(result.is_err());
        assert!(state.filters.job_type.is_empty());
    }

    #[test]
    fn page_selection_is_clamped_and_immediate() {
        let mut state = JobListState::default();
        state.pages = 3;
        let (_, actions) = handle_event(&mut state, &Event::PageSelected(7)).unwrap();
        assert_eq!(fetch_of(&actions).1, 3);

        let (_, actions) = handle_event(&mut state, &Event::PageSelected(0)).unwrap();
        assert_eq!(fetch_of(&actions).1, 1);
    }

    #[test]
    fn shrinking_page_count_corrects_cursor() {
        let mut state = JobListState::default();
        state.pages = 3;
        let (_, actions) = handle_event(&mut state, &Event::PageSelected(3)).unwrap();
        let (seq, _) = fetch_of(&actions);
        handle_event(&mut state, &loaded(seq, &[21], 3)).unwrap();
        assert_eq!(state.current_page, 3);

        state.current_page = 3;
        let fetch = state.begin_fetch();
        let WorkerMessage::FetchPage { seq, .. } = fetch else {
            panic!("expected fetch");
        };
        let (_, actions) = handle_event(&mut state, &loaded(seq, &[], 1)).unwrap();
        assert_eq!(state.current_page, 1);
        assert_eq!(fetch_of(&actions).1, 1);
    }

    #[test]
    fn empty_result_resets_to_first_page() {
        let mut state = JobListState::default();
        state.current_page = 4;
        let (_, actions) = handle_event(&mut state, &Event::Load).unwrap();
        let (seq, _) = fetch_of(&actions);
        let (_, actions) = handle_event(&mut state, &loaded(seq, &[], 0)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn late_response_does_not_overwrite_newer_one() {
        let mut state = JobListState::default();
        let (_, first) = handle_event(&mut state, &Event::Load).unwrap();
        let (_, second) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let (first_seq, _) = fetch_of(&first);
        let (second_seq, _) = fetch_of(&second);

        handle_event(&mut state, &loaded(second_seq, &[7, 8], 1)).unwrap();
        let (changed, actions) = handle_event(&mut state, &loaded(first_seq, &[1, 2, 3], 5)).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state.jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![7, 8]);
        assert_eq!(state.pages, 1);
        assert!(!state.loading);
    }

    #[test]
    fn fetch_failure_keeps_jobs_and_sets_error() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1)];
        let (_, actions) = handle_event(&mut state, &Event::Load).unwrap();
        let (seq, _) = fetch_of(&actions);
        handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::PageFailed {
                seq,
                message: "boom".into(),
            }),
        )
        .unwrap();
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.jobs.len(), 1);
        assert!(!state.loading);

        let (changed, _) = handle_event(&mut state, &Event::DismissError).unwrap();
        assert!(changed);
        assert!(state.error.is_none());
    }

    #[test]
    fn deleting_last_job_on_later_page_moves_back() {
        let mut state = JobListState::default();
        state.current_page = 2;
        state.pages = 2;
        state.jobs = vec![job(11)];

        let (_, actions) = handle_event(&mut state, &Event::DeleteConfirmed { id: 11 }).unwrap();
        assert_eq!(actions, vec![Action::PostToWorker(WorkerMessage::delete_job(11))]);
        assert!(state.jobs.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::Worker(WorkerResponse::JobDeleted { id: 11 })).unwrap();
        assert_eq!(fetch_of(&actions).1, 1);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn deleting_one_of_several_refetches_same_page() {
        let mut state = JobListState::default();
        state.current_page = 2;
        state.pages = 2;
        state.jobs = vec![job(11), job(12)];

        handle_event(&mut state, &Event::DeleteConfirmed { id: 11 }).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Worker(WorkerResponse::JobDeleted { id: 11 })).unwrap();
        assert_eq!(fetch_of(&actions).1, 2);
    }

    #[test]
    fn deleting_job_from_another_page_keeps_cursor() {
        let mut state = JobListState::default();
        state.current_page = 2;
        state.pages = 2;
        state.jobs = vec![job(2)];

        handle_event(&mut state, &Event::DeleteConfirmed { id: 1 }).unwrap();
        assert_eq!(state.jobs.len(), 1);

        let (_, actions) = handle_event(&mut state, &Event::Worker(WorkerResponse::JobDeleted { id: 1 })).unwrap();
        assert_eq!(fetch_of(&actions).1, 2);
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn deleting_only_job_on_first_page_stays() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1)];
        handle_event(&mut state, &Event::DeleteConfirmed { id: 1 }).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Worker(WorkerResponse::JobDeleted { id: 1 })).unwrap();
        assert_eq!(fetch_of(&actions).1, 1);
    }

    #[test]
    fn repeated_delete_is_suppressed_while_in_flight() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1), job(2)];
        handle_event(&mut state, &Event::DeleteConfirmed { id: 1 }).unwrap();
        let (changed, actions) = handle_event(&mut state, &Event::DeleteConfirmed { id: 1 }).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());

        handle_event(&mut state, &Event::Worker(WorkerResponse::JobDeleted { id: 1 })).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::DeleteConfirmed { id: 1 }).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn failed_delete_sets_separate_error_and_resyncs() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1), job(2)];
        state.error = Some("listing".into());

        handle_event(&mut state, &Event::DeleteConfirmed { id: 1 }).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::Worker(WorkerResponse::DeleteFailed {
                id: 1,
                message: "locked".into(),
            }),
        )
        .unwrap();
        let (seq, page) = fetch_of(&actions);
        assert_eq!(page, 1);
        assert_eq!(state.delete_error.as_deref(), Some("locked"));
        assert!(state.deleting.is_empty());

        handle_event(&mut state, &loaded(seq, &[1, 2], 1)).unwrap();
        assert_eq!(state.jobs.len(), 2);
        assert_eq!(state.delete_error.as_deref(), Some("locked"));
        assert!(state.error.is_none());
    }
}
