//! HTTP implementation of [`JobsBackend`] on top of `reqwest`.

use crate::api::backend::JobsBackend;
use crate::domain::error::{JobBoardError, Result};
use crate::domain::{FilterState, JobRecord, NewJob, PagedResult};
use crate::Config;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Error body returned by the backend on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// REST client for the job collection.
///
/// The base URL is injected (normally `Config::api_base_url`) and must include the
/// `/api` prefix, e.g. `http://localhost:5000/api`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Config`] if the URL is not absolute or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| JobBoardError::Config(format!("invalid api_base_url '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(JobBoardError::Config(format!(
                "api_base_url must be http(s), got '{base_url}'"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JobBoardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpBackend::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url, Duration::from_secs(config.request_timeout_secs))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(method = %method, url = %url, "sending backend request");
        self.client.request(method, url)
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "backend request failed");
            if e.is_timeout() {
                JobBoardError::Transport("request timed out".to_string())
            } else {
                JobBoardError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error);
        tracing::warn!(status = status.as_u16(), error = ?message, "backend returned error status");

        Err(JobBoardError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| JobBoardError::Decode(e.to_string()))
    }

    fn not_found_as(id: i64) -> impl FnOnce(JobBoardError) -> JobBoardError {
        move |err| match err {
            JobBoardError::Api { status: 404, .. } => JobBoardError::NotFound(id),
            other => other,
        }
    }
}

#[async_trait]
impl JobsBackend for HttpBackend {
    async fn list_jobs(&self, filters: &FilterState, page: u32, per_page: u32) -> Result<PagedResult> {
        let path = format!("/jobs?{}", filters.query_string(page, per_page));
        let response = Self::send(self.request(Method::GET, &path)).await?;
        let result: PagedResult = Self::decode(response).await?;
        tracing::debug!(page, pages = result.pages, count = result.jobs.len(), "page received");
        Ok(result)
    }

    async fn get_job(&self, id: i64) -> Result<JobRecord> {
        let response = Self::send(self.request(Method::GET, &format!("/jobs/{id}")))
            .await
            .map_err(Self::not_found_as(id))?;
        Self::decode(response).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobRecord> {
        let response = Self::send(self.request(Method::POST, "/jobs").json(job)).await?;
        if response.status() != StatusCode::CREATED {
            tracing::warn!(status = response.status().as_u16(), "create returned unexpected status");
            return Err(JobBoardError::Api {
                status: response.status().as_u16(),
                message: Some("Failed to create job".to_string()),
            });
        }
        Self::decode(response).await
    }

    async fn update_job(&self, id: i64, job: &NewJob) -> Result<JobRecord> {
        let response = Self::send(self.request(Method::PUT, &format!("/jobs/{id}")).json(job))
            .await
            .map_err(Self::not_found_as(id))?;
        Self::decode(response).await
    }

    async fn delete_job(&self, id: i64) -> Result<()> {
        Self::send(self.request(Method::DELETE, &format!("/jobs/{id}")))
            .await
            .map_err(Self::not_found_as(id))?;
        tracing::debug!(job_id = id, "job deleted");
        Ok(())
    }
}
