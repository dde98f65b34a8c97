//! Job creation and full-replacement edit workflows.
//!
//! Both run the client-side field checks first and only contact the backend when
//! they pass. Backend failures are reported with the server's own message when it
//! sent one.

use crate::api::JobsBackend;
use crate::domain::error::{JobBoardError, Result};
use crate::domain::{JobRecord, NewJob};

/// Shown when creation fails without a server-supplied message.
pub const CREATE_FALLBACK_MESSAGE: &str = "Failed to create job. Please try again.";

/// Shown when an edit fails without a server-supplied message.
pub const UPDATE_FALLBACK_MESSAGE: &str = "Failed to update job. Please try again.";

/// Validates and posts a new job.
///
/// # Errors
///
/// - [`JobBoardError::Validation`] when a field check fails; nothing is sent
/// - [`JobBoardError::Create`] when the backend refuses or cannot be reached
pub async fn create_job<B>(backend: &B, job: NewJob) -> Result<JobRecord>
where
    B: JobsBackend + ?Sized,
{
    let job = job.normalized();
    job.validate()?;

    let created = backend.create_job(&job).await.map_err(|e| {
        tracing::warn!(error = %e, "failed to create job");
        JobBoardError::Create(e.server_message().unwrap_or(CREATE_FALLBACK_MESSAGE).to_string())
    })?;

    tracing::info!(job_id = created.id, title = %created.title, "job created");
    Ok(created)
}

/// Validates and fully replaces an existing job.
///
/// # Errors
///
/// - [`JobBoardError::Validation`] when a field check fails; nothing is sent
/// - [`JobBoardError::NotFound`] when the job no longer exists
/// - [`JobBoardError::Create`] for any other backend refusal
pub async fn replace_job<B>(backend: &B, id: i64, job: NewJob) -> Result<JobRecord>
where
    B: JobsBackend + ?Sized,
{
    let job = job.normalized();
    job.validate()?;

    match backend.update_job(id, &job).await {
        Ok(updated) => {
            tracing::info!(job_id = id, "job updated");
            Ok(updated)
        }
        Err(e) if e.is_not_found() => Err(JobBoardError::NotFound(id)),
        Err(e) => {
            tracing::warn!(job_id = id, error = %e, "failed to update job");
            Err(JobBoardError::Create(
                e.server_message().unwrap_or(UPDATE_FALLBACK_MESSAGE).to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryBackend;
    use crate::domain::JobType;

    fn draft() -> NewJob {
        NewJob {
            title: "  Frontend Engineer ".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: Some(JobType::PartTime),
            tags: vec!["react".into(), " node ".into()],
            ..NewJob::default()
        }
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_backend() {
        let backend = InMemoryBackend::new();
        let err = create_job(
            &backend,
            NewJob {
                company: String::new(),
                ..draft()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, JobBoardError::Validation(ref m) if m.contains("company")));
        assert!(backend.jobs().is_empty());
    }

    #[tokio::test]
    async fn created_job_is_trimmed_and_keeps_tag_order() {
        let backend = InMemoryBackend::new();
        let job = create_job(&backend, draft()).await.unwrap();
        assert_eq!(job.id, 1);
        assert_eq!(job.title, "Frontend Engineer");
        assert_eq!(job.tags, vec!["react".to_string(), "node".to_string()]);
    }

    #[tokio::test]
    async fn replace_overwrites_every_field() {
        let backend = InMemoryBackend::new();
        let job = create_job(&backend, draft()).await.unwrap();

        let mut edit = NewJob::from(&job);
        edit.title = "Staff Engineer".into();
        edit.tags = vec![];
        let updated = replace_job(&backend, job.id, edit).await.unwrap();
        assert_eq!(updated.title, "Staff Engineer");
        assert!(updated.tags.is_empty());

        let err = replace_job(&backend, 99, draft()).await.unwrap_err();
        assert!(matches!(err, JobBoardError::NotFound(99)));
    }
}
