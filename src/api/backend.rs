//! Backend abstraction.
//!
//! This module defines the [`JobsBackend`] trait that abstracts over the REST
//! collection the client talks to. Coordinators depend on the trait only, so tests
//! and offline tools can swap the HTTP client for [`super::InMemoryBackend`].
//!
//! The trait is minimal and maps one method to one endpoint:
//!
//! | method        | endpoint                 |
//! |---------------|--------------------------|
//! | `list_jobs`   | `GET /api/jobs?...`      |
//! | `get_job`     | `GET /api/jobs/{id}`     |
//! | `create_job`  | `POST /api/jobs`         |
//! | `update_job`  | `PUT /api/jobs/{id}`     |
//! | `delete_job`  | `DELETE /api/jobs/{id}`  |

use crate::domain::error::Result;
use crate::domain::{FilterState, JobRecord, NewJob, PagedResult};
use async_trait::async_trait;

/// Abstraction over the job collection endpoint family.
///
/// Implementations report raw backend failures (`Api`, `Transport`, `Decode`,
/// `NotFound`); turning them into user-facing messages is the caller's job.
#[async_trait]
pub trait JobsBackend: Send + Sync {
    /// Reads one page of the filtered, sorted collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn list_jobs(&self, filters: &FilterState, page: u32, per_page: u32) -> Result<PagedResult>;

    /// Reads a single posting.
    ///
    /// # Errors
    ///
    /// Returns [`crate::JobBoardError::NotFound`] when no posting has this id.
    async fn get_job(&self, id: i64) -> Result<JobRecord>;

    /// Creates a posting; the backend assigns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the payload.
    async fn create_job(&self, job: &NewJob) -> Result<JobRecord>;

    /// Replaces every field of an existing posting.
    ///
    /// # Errors
    ///
    /// Returns an error if the posting does not exist or the payload is rejected.
    async fn update_job(&self, id: i64, job: &NewJob) -> Result<JobRecord>;

    /// Deletes a posting.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the request fails.
    async fn delete_job(&self, id: i64) -> Result<()>;
}
