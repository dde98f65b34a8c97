#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use jobboard::domain::{FilterState, JobRecord, JobType, NewJob, PagedResult};
use jobboard::{Config, InMemoryBackend, JobsBackend, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// `count` jobs, newest last; even ids are "Engineer" postings, odd ids "Designer".
pub fn jobs(count: i64) -> Vec<JobRecord> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    (1..=count)
        .map(|i| JobRecord {
            id: i,
            title: if i % 2 == 0 {
                format!("Engineer {i:02}")
            } else {
                format!("Designer {i:02}")
            },
            company: if i % 3 == 0 { "Initech".into() } else { "Acme".into() },
            location: "Remote".into(),
            job_type: if i % 4 == 0 { JobType::Contract } else { JobType::FullTime },
            description: Some(format!("Posting number {i} with details")),
            url: None,
            tags: vec!["rust".into()],
            posting_date: base + ChronoDuration::days(i),
            created_at: None,
            updated_at: None,
        })
        .collect()
}

pub fn seeded(count: i64) -> Arc<InMemoryBackend> {
    Arc::new(InMemoryBackend::with_jobs(jobs(count)))
}

pub fn config() -> Config {
    Config::default()
}

pub fn ids(jobs: &[JobRecord]) -> Vec<i64> {
    jobs.iter().map(|j| j.id).collect()
}

/// Delegates to an in-memory backend, delaying listings per requested page.
pub struct PageDelayBackend {
    pub inner: Arc<InMemoryBackend>,
    pub delays: HashMap<u32, Duration>,
}

#[async_trait]
impl JobsBackend for PageDelayBackend {
    async fn list_jobs(&self, filters: &FilterState, page: u32, per_page: u32) -> Result<PagedResult> {
        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.list_jobs(filters, page, per_page).await
    }

    async fn get_job(&self, id: i64) -> Result<JobRecord> {
        self.inner.get_job(id).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobRecord> {
        self.inner.create_job(job).await
    }

    async fn update_job(&self, id: i64, job: &NewJob) -> Result<JobRecord> {
        self.inner.update_job(id, job).await
    }

    async fn delete_job(&self, id: i64) -> Result<()> {
        self.inner.delete_job(id).await
    }
}
