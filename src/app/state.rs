//! Job list state and view model computation.
//!
//! This module defines [`JobListState`], the single state holder behind one list
//! view. It is mutated only by [`super::handle_event`] and is the source from which
//! [`JobListViewModel`] snapshots are computed.
//!
//! # State Components
//!
//! - **Listing**: jobs on the current page and the backend-reported page count
//! - **Cursor**: filters, current page and page length
//! - **Status**: loading flag plus two independent error slots (listing, deletion)
//! - **Deletions**: ids whose delete request is in flight, with the list length
//!   observed just before each optimistic removal
//! - **Sequencing**: monotonic request numbers used to discard stale pages
//!
//! # Request Sequencing
//!
//! Every listing request gets the next sequence number. A response is applied only
//! if its number is newer than the last one applied, so a slow response can never
//! overwrite a newer one. `loading` stays set until the newest request answers.

use crate::domain::{FilterState, JobRecord};
use crate::ui::helpers::format_posted_date;
use crate::ui::viewmodel::{EmptyState, JobCard, JobListViewModel};
use crate::worker::WorkerMessage;
use std::collections::{HashMap, HashSet};

/// State holder for one job list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListState {
    /// Jobs currently displayed, in backend order.
    pub jobs: Vec<JobRecord>,

    /// Total page count reported by the most recent applied listing.
    pub pages: u32,

    /// 1-indexed page cursor.
    pub current_page: u32,

    /// Filter and sort values as edited by the user.
    pub filters: FilterState,

    /// Page length sent with every listing request.
    pub per_page: u32,

    /// A listing request is outstanding.
    pub loading: bool,

    /// Listing failure message.
    pub error: Option<String>,

    /// Deletion failure message, kept apart from `error`.
    pub delete_error: Option<String>,

    /// Ids whose delete request is in flight.
    pub deleting: HashSet<i64>,

    /// Whether each in-flight optimistic removal left the displayed page empty.
    pending_deletes: HashMap<i64, bool>,

    next_seq: u64,
    latest_requested: u64,
    last_applied: u64,
}

impl Default for JobListState {
    fn default() -> Self {
        Self::new(crate::domain::DEFAULT_PER_PAGE)
    }
}

impl JobListState {
    /// Creates an empty list positioned on page 1 with default filters.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            jobs: vec![],
            pages: 0,
            current_page: 1,
            filters: FilterState::default(),
            per_page: per_page.max(1),
            loading: false,
            error: None,
            delete_error: None,
            deleting: HashSet::new(),
            pending_deletes: HashMap::new(),
            next_seq: 0,
            latest_requested: 0,
            last_applied: 0,
        }
    }

    /// Creates a list that will start on `page` under `filters`.
    #[must_use]
    pub fn with_query(per_page: u32, filters: FilterState, page: u32) -> Self {
        Self {
            filters,
            current_page: page.max(1),
            ..Self::new(per_page)
        }
    }

    /// Issues a listing request for the current filters and page.
    ///
    /// Assigns the next sequence number and marks the list as loading.
    pub fn begin_fetch(&mut self) -> WorkerMessage {
        self.next_seq += 1;
        self.latest_requested = self.next_seq;
        self.loading = true;

        tracing::debug!(
            seq = self.next_seq,
            page = self.current_page,
            "listing request issued"
        );

        WorkerMessage::fetch_page(self.next_seq, self.filters.clone(), self.current_page, self.per_page)
    }

    /// Accepts or rejects a listing response by sequence number.
    ///
    /// Returns `false` for a response that is not newer than the last applied one.
    /// On acceptance `loading` is recomputed against the newest request.
    pub fn accept_response(&mut self, seq: u64) -> bool {
        if seq <= self.last_applied {
            return false;
        }
        self.last_applied = seq;
        self.loading = seq < self.latest_requested;
        true
    }

    /// Whether `seq` answers the newest listing request issued so far.
    #[must_use]
    pub const fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest_requested
    }

    /// Whether any listing response has been applied yet.
    #[must_use]
    pub const fn has_loaded(&self) -> bool {
        self.last_applied > 0
    }

    /// Replaces the displayed jobs, hiding any whose deletion is still in flight.
    pub fn replace_jobs(&mut self, jobs: &[JobRecord]) {
        self.jobs = jobs
            .iter()
            .filter(|job| !self.deleting.contains(&job.id))
            .cloned()
            .collect();
    }

    /// Starts an optimistic deletion.
    ///
    /// Returns `false` without touching state when `id` is already being deleted.
    pub fn begin_delete(&mut self, id: i64) -> bool {
        if !self.deleting.insert(id) {
            return false;
        }
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        let emptied = self.jobs.len() < before && self.jobs.is_empty();
        self.pending_deletes.insert(id, emptied);
        self.delete_error = None;
        true
    }

    /// Finishes a deletion.
    ///
    /// Returns `true` when removing `id` was what emptied the displayed page. An id
    /// that was not displayed never counts, even if the page was already empty.
    pub fn finish_delete(&mut self, id: i64) -> bool {
        self.deleting.remove(&id);
        self.pending_deletes.remove(&id).unwrap_or_default()
    }

    /// Computes the presentation snapshot of the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> JobListViewModel {
        let jobs: Vec<JobCard> = self
            .jobs
            .iter()
            .map(|job| JobCard {
                id: job.id,
                title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                job_type: job.job_type.to_string(),
                posted: format_posted_date(&job.posting_date),
                description: job.description.clone(),
                tags: job.tags.clone(),
            })
            .collect();

        let mut deleting: Vec<i64> = self.deleting.iter().copied().collect();
        deleting.sort_unstable();

        let empty_state = (self.has_loaded() && !self.loading && self.error.is_none() && jobs.is_empty())
            .then(|| self.empty_state());

        JobListViewModel {
            show_skeleton: self.loading && jobs.is_empty(),
            show_pagination: self.pages > 1,
            jobs,
            loading: self.loading,
            error: self.error.clone(),
            delete_error: self.delete_error.clone(),
            pages: self.pages,
            current_page: self.current_page,
            filters: self.filters.clone(),
            empty_state,
            deleting,
        }
    }

    fn empty_state(&self) -> EmptyState {
        let filtered = [
            &self.filters.title,
            &self.filters.company,
            &self.filters.location,
            &self.filters.job_type,
        ]
        .iter()
        .any(|value| !value.is_empty());

        if filtered {
            EmptyState {
                message: "No jobs found".to_string(),
                subtitle: "Try adjusting your search filters".to_string(),
            }
        } else {
            EmptyState {
                message: "No jobs posted yet".to_string(),
                subtitle: "Add a job to get started".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobType;
    use chrono::{TimeZone, Utc};

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
            posting_date: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn sequencing_discards_older_responses() {
        let mut state = JobListState::default();
        let first = state.begin_fetch();
        let second = state.begin_fetch();
        assert!(matches!(first, WorkerMessage::FetchPage { seq: 1, .. }));
        assert!(matches!(second, WorkerMessage::FetchPage { seq: 2, .. }));

        assert!(state.accept_response(2));
        assert!(!state.loading);
        assert!(!state.accept_response(1));
        assert!(!state.accept_response(2));
    }

    #[test]
    fn older_response_applied_first_keeps_loading() {
        let mut state = JobListState::default();
        state.begin_fetch();
        state.begin_fetch();

        assert!(state.accept_response(1));
        assert!(state.loading);
        assert!(!state.is_latest(1));
        assert!(state.accept_response(2));
        assert!(!state.loading);
    }

    #[test]
    fn optimistic_delete_tracks_whether_page_emptied() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1), job(2), job(3)];
        state.delete_error = Some("old".into());

        assert!(state.begin_delete(2));
        assert!(!state.begin_delete(2));
        assert_eq!(state.jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(state.delete_error.is_none());

        assert!(!state.finish_delete(2));
        assert!(state.deleting.is_empty());

        state.jobs = vec![job(7)];
        state.begin_delete(7);
        assert!(state.finish_delete(7));
    }

    #[test]
    fn deleting_an_id_not_displayed_never_empties_page() {
        let mut state = JobListState::default();
        state.jobs = vec![job(2)];

        assert!(state.begin_delete(1));
        assert_eq!(state.jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![2]);
        assert!(!state.finish_delete(1));

        state.jobs.clear();
        state.begin_delete(3);
        assert!(!state.finish_delete(3));
    }

    #[test]
    fn viewmodel_lists_in_flight_deletes() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1), job(2), job(3)];
        state.begin_delete(3);
        state.begin_delete(1);

        let vm = state.compute_viewmodel();
        assert_eq!(vm.deleting, vec![1, 3]);
        assert_eq!(vm.jobs.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2]);

        state.finish_delete(1);
        assert_eq!(state.compute_viewmodel().deleting, vec![3]);
    }

    #[test]
    fn replace_hides_jobs_being_deleted() {
        let mut state = JobListState::default();
        state.jobs = vec![job(1), job(2)];
        state.begin_delete(1);
        state.replace_jobs(&[job(1), job(2), job(3)]);
        assert_eq!(state.jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn viewmodel_flags() {
        let mut state = JobListState::default();
        let vm = state.compute_viewmodel();
        assert!(vm.empty_state.is_none());
        assert!(!vm.show_skeleton);

        state.begin_fetch();
        assert!(state.compute_viewmodel().show_skeleton);

        state.accept_response(1);
        state.pages = 0;
        let vm = state.compute_viewmodel();
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No jobs posted yet".to_string()));

        state.jobs = vec![job(1)];
        state.pages = 2;
        let vm = state.compute_viewmodel();
        assert!(vm.show_pagination);
        assert_eq!(vm.jobs[0].posted, "Jan 5, 2024");
        assert_eq!(vm.jobs[0].job_type, "Full-time");
    }
}
