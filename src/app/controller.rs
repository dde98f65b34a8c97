//! Async runtime for the job list state machine.
//!
//! [`JobListController`] is the action processor: it feeds events into
//! [`handle_event`], executes the resulting actions (debounce timer, worker calls)
//! and publishes a fresh [`JobListViewModel`] through a `watch` channel after every
//! state change.
//!
//! # Concurrency
//!
//! The controller is cheap to clone and every clone drives the same list. Calls may
//! overlap freely: the state mutex is held only while an event is applied, never
//! across a backend call, and overlapping listing responses are ordered by the
//! state's sequence numbers.
//!
//! ```text
//! set_filter ─→ ScheduleDebounce ─(500 ms)─→ DebounceElapsed ─→ FetchPage ─→ PageLoaded
//! set_page ───────────────────────────────────────────────────→ FetchPage ─→ PageLoaded
//! delete_job ─→ DeleteConfirmed ─→ DeleteJob ─→ JobDeleted / DeleteFailed ─→ FetchPage
//! ```

use crate::api::JobsBackend;
use crate::app::debounce::DebounceGate;
use crate::app::{handle_event, Action, Event, JobListState};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::{FilterKey, FilterState, PagedResult};
use crate::ui::JobListViewModel;
use crate::worker::{JobWorker, WorkerResponse, FETCH_FALLBACK_MESSAGE};
use crate::Config;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

/// Asks the user to confirm a destructive action.
pub trait ConfirmationGate {
    /// Returns `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that approves everything, for `--yes` and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

impl<F> ConfirmationGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What became of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The confirmation gate declined.
    Cancelled,
    /// A deletion of the same id was already in flight; nothing was sent.
    Suppressed,
    /// The backend deleted the job.
    Deleted,
    /// The backend refused; the list was resynchronised. Carries the message shown.
    Failed(String),
}

struct Inner<B: ?Sized> {
    state: Mutex<JobListState>,
    worker: JobWorker<B>,
    debounce: DebounceGate,
    view: watch::Sender<JobListViewModel>,
}

/// Drives one job list view against a backend.
pub struct JobListController<B: ?Sized> {
    inner: Arc<Inner<B>>,
}

impl<B: ?Sized> Clone for JobListController<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B> JobListController<B>
where
    B: JobsBackend + ?Sized + 'static,
{
    /// Creates a controller positioned on page 1 with default filters.
    #[must_use]
    pub fn new(backend: Arc<B>, config: &Config) -> Self {
        Self::with_state(backend, config, JobListState::new(config.per_page))
    }

    /// Creates a controller that starts on `page` under `filters`.
    ///
    /// Nothing is fetched until [`Self::load`] is called.
    #[must_use]
    pub fn with_query(backend: Arc<B>, config: &Config, filters: FilterState, page: u32) -> Self {
        Self::with_state(backend, config, JobListState::with_query(config.per_page, filters, page))
    }

    fn with_state(backend: Arc<B>, config: &Config, state: JobListState) -> Self {
        let (view, _) = watch::channel(state.compute_viewmodel());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                worker: JobWorker::new(backend),
                debounce: DebounceGate::new(Duration::from_millis(config.debounce_ms)),
                view,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, JobListState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one event under the state lock and publishes the result.
    fn apply(&self, event: &Event) -> Result<Vec<Action>> {
        let mut state = self.lock();
        let (changed, actions) = handle_event(&mut state, event)?;
        if changed {
            self.inner.view.send_replace(state.compute_viewmodel());
        }
        Ok(actions)
    }

    /// Feeds an event through the state machine and runs every action it leads to.
    ///
    /// Returns the worker responses produced along the way, in order.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`handle_event`]. Backend failures are not
    /// errors here; they become state.
    pub async fn dispatch(&self, event: Event) -> Result<Vec<WorkerResponse>> {
        let mut queue = VecDeque::from([event]);
        let mut responses = vec![];

        while let Some(event) = queue.pop_front() {
            for action in self.apply(&event)? {
                match action {
                    Action::ScheduleDebounce => self.schedule_debounce(),
                    Action::PostToWorker(message) => {
                        let response = self.inner.worker.handle_message(message).await;
                        responses.push(response.clone());
                        queue.push_back(Event::Worker(response));
                    }
                }
            }
        }
        Ok(responses)
    }

    fn schedule_debounce(&self) {
        let controller = self.clone();
        self.inner.debounce.schedule(async move {
            if let Err(e) = controller.dispatch(Event::DebounceElapsed).await {
                tracing::warn!(error = %e, "debounced fetch failed");
            }
        });
    }

    /// Fetches the current page.
    ///
    /// # Errors
    ///
    /// Never fails in practice; listing failures land in `error`.
    pub async fn load(&self) -> Result<()> {
        self.dispatch(Event::Load).await.map(drop)
    }

    /// Updates a filter; the list refetches from page 1 once edits pause.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Validation`] for an unknown job type or sort value.
    pub async fn set_filter(&self, key: FilterKey, value: &str) -> Result<()> {
        self.dispatch(Event::FilterChanged {
            key,
            value: value.to_string(),
        })
        .await
        .map(drop)
    }

    /// Clears a filter; the list refetches from page 1 once edits pause.
    ///
    /// # Errors
    ///
    /// Never fails in practice.
    pub async fn clear_filter(&self, key: FilterKey) -> Result<()> {
        self.dispatch(Event::FilterCleared { key }).await.map(drop)
    }

    /// Moves to `page` (clamped to the known page range) and fetches it immediately.
    ///
    /// # Errors
    ///
    /// Never fails in practice; listing failures land in `error`.
    pub async fn set_page(&self, page: u32) -> Result<()> {
        self.dispatch(Event::PageSelected(page)).await.map(drop)
    }

    /// Deletes a job after confirmation, optimistically removing it from the list.
    ///
    /// # Errors
    ///
    /// Never fails in practice; a backend refusal is reported as
    /// [`DeleteOutcome::Failed`] and in `delete_error`.
    pub async fn delete_job(&self, id: i64, gate: &dyn ConfirmationGate) -> Result<DeleteOutcome> {
        if self.lock().deleting.contains(&id) {
            return Ok(DeleteOutcome::Suppressed);
        }
        if !gate.confirm(&format!("Are you sure you want to delete job #{id}?")) {
            tracing::debug!(job_id = id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let responses = self.dispatch(Event::DeleteConfirmed { id }).await?;
        let outcome = responses
            .into_iter()
            .find_map(|response| match response {
                WorkerResponse::JobDeleted { id: deleted } if deleted == id => Some(DeleteOutcome::Deleted),
                WorkerResponse::DeleteFailed { id: failed, message } if failed == id => {
                    Some(DeleteOutcome::Failed(message))
                }
                _ => None,
            })
            .unwrap_or(DeleteOutcome::Suppressed);
        Ok(outcome)
    }

    /// Reads one page without touching list state.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Fetch`] with the server's message when it sent one,
    /// a generic message otherwise.
    pub async fn fetch_page(&self, filters: &FilterState, page: u32) -> Result<PagedResult> {
        let per_page = self.lock().per_page;
        self.inner
            .worker
            .backend()
            .list_jobs(filters, page.max(1), per_page)
            .await
            .map_err(|e| JobBoardError::Fetch(e.server_message().unwrap_or(FETCH_FALLBACK_MESSAGE).to_string()))
    }

    /// Clears the listing error banner.
    pub fn dismiss_error(&self) {
        if let Err(e) = self.apply(&Event::DismissError) {
            tracing::warn!(error = %e, "failed to dismiss listing error");
        }
    }

    /// Clears the deletion error banner, leaving the listing error alone.
    pub fn dismiss_delete_error(&self) {
        if let Err(e) = self.apply(&Event::DismissDeleteError) {
            tracing::warn!(error = %e, "failed to dismiss delete error");
        }
    }

    /// Current view model.
    #[must_use]
    pub fn view(&self) -> JobListViewModel {
        self.inner.view.borrow().clone()
    }

    /// Receives a new view model after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<JobListViewModel> {
        self.inner.view.subscribe()
    }

    /// Whether a debounced refetch is waiting for edits to pause.
    #[must_use]
    pub fn refetch_pending(&self) -> bool {
        self.inner.debounce.is_pending()
    }

    /// Copy of the underlying state, including the filter values being edited.
    #[must_use]
    pub fn snapshot(&self) -> JobListState {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryBackend;
    use crate::domain::{JobRecord, JobType};
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    fn seeded(count: i64) -> Arc<InMemoryBackend> {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Arc::new(InMemoryBackend::with_jobs(
            (1..=count)
                .map(|i| JobRecord {
                    id: i,
                    title: if i % 2 == 0 { format!("Engineer {i}") } else { format!("Designer {i}") },
                    company: "Acme".into(),
                    location: "Remote".into(),
                    job_type: JobType::FullTime,
                    description: None,
                    url: None,
                    tags: vec![],
                    posting_date: base + ChronoDuration::hours(i),
                    created_at: None,
                    updated_at: None,
                })
                .collect(),
        ))
    }

    #[tokio::test]
    async fn load_publishes_view() {
        let controller = JobListController::new(seeded(12), &Config::default());
        let mut rx = controller.subscribe();

        controller.load().await.unwrap();
        assert!(rx.has_changed().unwrap());
        let vm = rx.borrow_and_update().clone();
        assert_eq!(vm.jobs.len(), 10);
        assert_eq!(vm.pages, 2);
        assert!(vm.show_pagination);
        assert!(!vm.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn filter_burst_fetches_once_from_page_one() {
        let backend = seeded(30);
        let controller = JobListController::new(Arc::clone(&backend), &Config::default());
        controller.load().await.unwrap();
        controller.set_page(3).await.unwrap();
        assert_eq!(backend.list_calls(), 2);

        for value in ["E", "En", "Eng"] {
            controller.set_filter(FilterKey::Title, value).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(controller.refetch_pending());
        assert_eq!(controller.view().current_page, 3);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(backend.list_calls(), 3);

        let vm = controller.view();
        assert_eq!(vm.current_page, 1);
        assert!(vm.jobs.iter().all(|card| card.title.starts_with("Engineer")));
    }

    #[tokio::test]
    async fn cancelled_confirmation_sends_nothing() {
        let backend = seeded(3);
        let controller = JobListController::new(Arc::clone(&backend), &Config::default());
        controller.load().await.unwrap();

        let outcome = controller.delete_job(2, &|_: &str| false).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(backend.delete_calls(2), 0);
        assert_eq!(controller.view().jobs.len(), 3);
    }

    #[tokio::test]
    async fn fetch_page_maps_failures_to_fetch_error() {
        let backend = seeded(1);
        let controller = JobListController::new(Arc::clone(&backend), &Config::default());

        backend.fail_next_list(None);
        let err = controller.fetch_page(&FilterState::default(), 1).await.unwrap_err();
        assert!(matches!(err, JobBoardError::Fetch(ref m) if m == FETCH_FALLBACK_MESSAGE));

        let page = controller.fetch_page(&FilterState::default(), 1).await.unwrap();
        assert_eq!(page.jobs.len(), 1);
        assert_eq!(controller.view().pages, 0);
    }

    #[tokio::test]
    async fn dismissing_errors_publishes_each_separately() {
        let backend = seeded(2);
        let controller = JobListController::new(Arc::clone(&backend), &Config::default());
        controller.load().await.unwrap();

        backend.fail_next_delete(Some("locked"));
        controller.delete_job(1, &AlwaysConfirm).await.unwrap();
        backend.fail_next_list(None);
        controller.load().await.unwrap();

        let mut rx = controller.subscribe();
        rx.borrow_and_update();

        controller.dismiss_error();
        assert!(rx.has_changed().unwrap());
        let vm = rx.borrow_and_update().clone();
        assert!(vm.error.is_none());
        assert_eq!(vm.delete_error.as_deref(), Some("locked"));

        controller.dismiss_delete_error();
        assert!(rx.borrow_and_update().delete_error.is_none());

        controller.dismiss_error();
        assert!(!rx.has_changed().unwrap());
    }
}
