//! In-process implementation of [`JobsBackend`].
//!
//! Mirrors the REST service's listing semantics so coordinators can be exercised
//! without a network:
//!
//! - `title`, `company`, `location`: case-insensitive substring match
//! - `job_type`: exact match
//! - ordering by `posting_date`, `title` or `company`, ascending or descending
//! - `pages = ceil(total / per_page)`; a page past the end is empty, not an error
//! - ids are assigned from a counter and never reused
//!
//! Writes go through the same JSON wire format as [`super::HttpBackend`], so the
//! tag encoding is exercised on both paths. Failure injection and call counters
//! let tests observe what a coordinator actually sent.

use crate::api::backend::JobsBackend;
use crate::domain::error::{JobBoardError, Result};
use crate::domain::page::page_count;
use crate::domain::{FilterState, JobRecord, JobType, NewJob, PagedResult, SortBy, SortOrder};
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    jobs: Vec<JobRecord>,
    next_id: i64,
    latency: Option<Duration>,
    fail_next_list: Option<String>,
    fail_next_delete: Option<String>,
    list_calls: usize,
    delete_calls: HashMap<i64, usize>,
}

/// Job collection held in memory.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    inner: Mutex<Inner>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `jobs`, keeping their ids.
    #[must_use]
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        let next_id = jobs.iter().map(|j| j.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                jobs,
                next_id,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Delays every response by `latency` (uses the tokio clock).
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = Some(latency);
    }

    /// Makes the next listing call fail with a 500 carrying `message`.
    pub fn fail_next_list(&self, message: Option<&str>) {
        self.lock().fail_next_list = Some(message.unwrap_or_default().to_string());
    }

    /// Makes the next delete call fail with a 500 carrying `message`.
    pub fn fail_next_delete(&self, message: Option<&str>) {
        self.lock().fail_next_delete = Some(message.unwrap_or_default().to_string());
    }

    /// Number of listing requests served so far.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// Number of delete requests received for `id`.
    #[must_use]
    pub fn delete_calls(&self, id: i64) -> usize {
        self.lock().delete_calls.get(&id).copied().unwrap_or(0)
    }

    /// Snapshot of every stored job, in insertion order.
    #[must_use]
    pub fn jobs(&self) -> Vec<JobRecord> {
        self.lock().jobs.clone()
    }

    async fn simulate_latency(&self) {
        let latency = self.lock().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn injected_failure(slot: &mut Option<String>) -> Result<()> {
        match slot.take() {
            Some(message) => Err(JobBoardError::Api {
                status: 500,
                message: Some(message).filter(|m| !m.is_empty()),
            }),
            None => Ok(()),
        }
    }

    fn matches(job: &JobRecord, filters: &FilterState) -> bool {
        let contains = |haystack: &str, needle: &str| {
            needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
        };
        contains(&job.title, &filters.title)
            && contains(&job.company, &filters.company)
            && contains(&job.location, &filters.location)
            && (filters.job_type.is_empty() || job.job_type.as_str() == filters.job_type)
    }

    fn compare(a: &JobRecord, b: &JobRecord, sort_by: SortBy) -> Ordering {
        match sort_by {
            SortBy::PostingDate => a.posting_date.cmp(&b.posting_date),
            SortBy::Title => a.title.cmp(&b.title),
            SortBy::Company => a.company.cmp(&b.company),
        }
    }

    /// Decodes a write payload the way the server does, from its JSON wire form.
    fn decode_payload(job: &NewJob) -> Result<(JobType, Vec<String>)> {
        for (field, value) in [
            ("title", &job.title),
            ("company", &job.company),
            ("location", &job.location),
        ] {
            if value.trim().is_empty() {
                return Err(bad_request(format!("{field} cannot be empty")));
            }
        }
        let job_type = job
            .job_type
            .ok_or_else(|| bad_request("Missing required fields: job_type".to_string()))?;
        if let Some(url) = job.url.as_deref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(bad_request("URL must start with http:// or https://".to_string()));
            }
        }

        let wire = serde_json::to_value(job).map_err(|e| bad_request(e.to_string()))?;
        let tags = wire
            .get("tags")
            .and_then(serde_json::Value::as_str)
            .map(serde_json::from_str::<Vec<String>>)
            .transpose()
            .map_err(|_| bad_request("Invalid JSON string for tags".to_string()))?
            .unwrap_or_default();

        Ok((job_type, tags))
    }
}

fn bad_request(message: String) -> JobBoardError {
    JobBoardError::Api {
        status: 400,
        message: Some(message),
    }
}

#[async_trait]
impl JobsBackend for InMemoryBackend {
    async fn list_jobs(&self, filters: &FilterState, page: u32, per_page: u32) -> Result<PagedResult> {
        self.simulate_latency().await;

        let mut inner = self.lock();
        inner.list_calls += 1;
        Self::injected_failure(&mut inner.fail_next_list)?;

        let mut matching: Vec<JobRecord> = inner
            .jobs
            .iter()
            .filter(|job| Self::matches(job, filters))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            let ordering = Self::compare(a, b, filters.sort_by);
            match filters.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matching.len();
        let start = (page.max(1) as usize - 1).saturating_mul(per_page as usize);
        let jobs = matching
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        Ok(PagedResult {
            jobs,
            pages: page_count(total, per_page),
            total: Some(total as u64),
            current_page: Some(page),
        })
    }

    async fn get_job(&self, id: i64) -> Result<JobRecord> {
        self.simulate_latency().await;
        self.lock()
            .jobs
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or(JobBoardError::NotFound(id))
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobRecord> {
        self.simulate_latency().await;
        let (job_type, tags) = Self::decode_payload(job)?;

        let mut inner = self.lock();
        inner.next_id += 1;
        let now = Utc::now();
        let record = JobRecord {
            id: inner.next_id,
            title: job.title.trim().to_string(),
            company: job.company.trim().to_string(),
            location: job.location.trim().to_string(),
            job_type,
            description: job.description.clone(),
            url: job.url.clone(),
            tags,
            posting_date: job.posting_date,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.jobs.push(record.clone());
        Ok(record)
    }

    async fn update_job(&self, id: i64, job: &NewJob) -> Result<JobRecord> {
        self.simulate_latency().await;
        let (job_type, tags) = Self::decode_payload(job)?;

        let mut inner = self.lock();
        let existing = inner
            .jobs
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(JobBoardError::NotFound(id))?;

        existing.title = job.title.trim().to_string();
        existing.company = job.company.trim().to_string();
        existing.location = job.location.trim().to_string();
        existing.job_type = job_type;
        existing.description.clone_from(&job.description);
        existing.url.clone_from(&job.url);
        existing.tags = tags;
        existing.posting_date = job.posting_date;
        existing.updated_at = Some(Utc::now());
        Ok(existing.clone())
    }

    async fn delete_job(&self, id: i64) -> Result<()> {
        self.simulate_latency().await;

        let mut inner = self.lock();
        *inner.delete_calls.entry(id).or_insert(0) += 1;
        Self::injected_failure(&mut inner.fail_next_delete)?;

        let before = inner.jobs.len();
        inner.jobs.retain(|job| job.id != id);
        if inner.jobs.len() == before {
            return Err(JobBoardError::NotFound(id));
        }
        Ok(())
    }
}
