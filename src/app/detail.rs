//! Single-job view workflow.

use crate::api::JobsBackend;
use crate::app::controller::{ConfirmationGate, DeleteOutcome};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::JobRecord;
use crate::ui::helpers::format_posted_date;
use crate::ui::JobDetailViewModel;

/// Shown when a single-job read fails without a server-supplied message.
pub const DETAIL_FALLBACK_MESSAGE: &str = "Failed to fetch job details. Please try again later.";

/// Shown when the requested job does not exist.
pub const DETAIL_NOT_FOUND_MESSAGE: &str = "Job not found";

/// Shown when deleting from the single-job view fails without a server message.
pub const DETAIL_DELETE_FALLBACK_MESSAGE: &str = "Failed to delete job. Please try again later.";

/// Loads one job and formats it for display.
///
/// # Errors
///
/// Returns [`JobBoardError::Fetch`] carrying the message to show: `Job not found`
/// for a 404, the server's message when it sent one, a generic sentence otherwise.
pub async fn load_job_detail<B>(backend: &B, id: i64) -> Result<JobDetailViewModel>
where
    B: JobsBackend + ?Sized,
{
    match backend.get_job(id).await {
        Ok(job) => Ok(detail_viewmodel(&job)),
        Err(e) if e.is_not_found() => {
            tracing::debug!(job_id = id, "job not found");
            Err(JobBoardError::Fetch(DETAIL_NOT_FOUND_MESSAGE.to_string()))
        }
        Err(e) => {
            tracing::warn!(job_id = id, error = %e, "failed to load job");
            Err(JobBoardError::Fetch(
                e.server_message().unwrap_or(DETAIL_FALLBACK_MESSAGE).to_string(),
            ))
        }
    }
}

/// Deletes the job shown in the single-job view after confirmation.
///
/// There is no list to update here, so nothing is removed optimistically; the
/// caller navigates back to the list on [`DeleteOutcome::Deleted`].
///
/// # Errors
///
/// Never fails in practice; a backend refusal is reported as
/// [`DeleteOutcome::Failed`] with the server's message or a generic sentence.
pub async fn delete_from_detail<B>(backend: &B, id: i64, gate: &dyn ConfirmationGate) -> Result<DeleteOutcome>
where
    B: JobsBackend + ?Sized,
{
    if !gate.confirm("Are you sure you want to delete this job?") {
        tracing::debug!(job_id = id, "delete cancelled");
        return Ok(DeleteOutcome::Cancelled);
    }
    match backend.delete_job(id).await {
        Ok(()) => {
            tracing::info!(job_id = id, "job deleted");
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) => {
            tracing::warn!(job_id = id, error = %e, "failed to delete job");
            Ok(DeleteOutcome::Failed(
                e.server_message().unwrap_or(DETAIL_DELETE_FALLBACK_MESSAGE).to_string(),
            ))
        }
    }
}

#[must_use]
pub fn detail_viewmodel(job: &JobRecord) -> JobDetailViewModel {
    JobDetailViewModel {
        id: job.id,
        title: job.title.clone(),
        company: job.company.clone(),
        location: job.location.clone(),
        job_type: job.job_type.to_string(),
        posted: format_posted_date(&job.posting_date),
        description: job.description.clone().filter(|d| !d.trim().is_empty()),
        url: job.url.clone().filter(|u| !u.trim().is_empty()),
        tags: job.tags.clone(),
        updated: job.updated_at.as_ref().map(format_posted_date),
    }
}
