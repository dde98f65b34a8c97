//! Worker implementation executing backend calls for the list state machine.
//!
//! The worker never touches list state. It turns a [`WorkerMessage`] into a backend
//! call and the outcome into a [`WorkerResponse`], converting failures into the
//! message the user will see: the server's own `error` text when it sent one,
//! a generic sentence otherwise.

use crate::api::JobsBackend;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tracing::Instrument;

/// Shown when a listing fails without a server-supplied message.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch jobs. Please try again later.";

/// Shown when a deletion fails without a server-supplied message.
pub const DELETE_FALLBACK_MESSAGE: &str = "Failed to delete job. Please try again.";

/// Executes worker messages against a backend.
#[derive(Debug)]
pub struct JobWorker<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for JobWorker<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: JobsBackend + ?Sized> JobWorker<B> {
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Picks the user-facing message for a failed backend call and logs the cause.
    fn handle_backend_result<T, F>(operation: &str, fallback: &str, result: Result<T>, on_success: F) -> std::result::Result<T, String>
    where
        F: FnOnce(&T),
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "backend operation successful");
                on_success(&value);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "backend operation failed");
                Err(e.server_message().unwrap_or(fallback).to_string())
            }
        }
    }

    /// Processes a worker message and returns the matching response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);

        async move {
            match message {
                WorkerMessage::FetchPage {
                    seq,
                    filters,
                    page,
                    per_page,
                } => {
                    let result = self.backend.list_jobs(&filters, page, per_page).await;
                    match Self::handle_backend_result("fetch page", FETCH_FALLBACK_MESSAGE, result, |r| {
                        tracing::debug!(seq, page, pages = r.pages, job_count = r.jobs.len(), "page fetched");
                    }) {
                        Ok(result) => WorkerResponse::PageLoaded { seq, result },
                        Err(message) => WorkerResponse::PageFailed { seq, message },
                    }
                }

                WorkerMessage::DeleteJob { id } => {
                    let result = self.backend.delete_job(id).await;
                    match Self::handle_backend_result("delete job", DELETE_FALLBACK_MESSAGE, result, |_| {
                        tracing::debug!(job_id = id, "job deleted");
                    }) {
                        Ok(()) => WorkerResponse::JobDeleted { id },
                        Err(message) => WorkerResponse::DeleteFailed { id, message },
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
