//! Jobboard: client core for a job-listing REST backend.
//!
//! Jobboard provides:
//! - Filtered, sorted and paginated job listings with debounced refetching
//! - Optimistic deletion with per-job in-flight suppression and rollback by refetch
//! - Request sequencing so a slow listing response never overwrites a newer one
//! - Single-job detail, creation and full-replacement edit workflows
//! - A command-line front end rendering plain text

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command-line front end (main.rs)                   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Debounce timer and controller runtime            │
//! │  - Detail and editor workflows                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - View models │   │ - HTTP client │   │ - Messages    │
//! │ - Text render │   │ - In-memory   │   │ - Error text  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Job, filter and page models (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, stderr or rotating log file  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: List state machine, controller and one-shot workflows
//! - [`api`]: Backend trait with HTTP and in-memory implementations
//! - [`domain`]: Core domain types (jobs, filters, pages, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`worker`]: Backend call execution and user-facing failure messages
//! - [`ui`]: View models and plain-text rendering
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration is read from a TOML file, by default
//! `<config dir>/jobboard/config.toml`:
//!
//! ```toml
//! api_base_url = "https://jobs.example.com/api"
//! per_page = 10
//! debounce_ms = 500
//! request_timeout_secs = 30
//! log_level = "debug"
//! log_file = "~/.local/share/jobboard/jobboard.log"
//! ```
//!
//! `JOBBOARD_API_URL` overrides `api_base_url`.
//!
//! # Example
//!
//! ```no_run
//! use jobboard::app::{AlwaysConfirm, JobListController};
//! use jobboard::domain::FilterKey;
//! use jobboard::{initialize, Config};
//!
//! # async fn run() -> jobboard::Result<()> {
//! let config = Config::load(None)?;
//! let backend = initialize(&config)?;
//! let jobs = JobListController::new(backend, &config);
//!
//! jobs.load().await?;
//! jobs.set_filter(FilterKey::Title, "Engineer").await?;
//! jobs.delete_job(42, &AlwaysConfirm).await?;
//! println!("{}", jobboard::ui::render_job_list(&jobs.view()));
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Pure State Machine
//!
//! All list behaviour lives in `handle_event`, a synchronous function from
//! `(state, event)` to `(changed, actions)`. The controller only executes actions,
//! so every ordering of responses can be unit tested without timers or sockets.
//!
//! ## Optimistic Deletion
//!
//! Deleted jobs disappear from the list before the backend answers. Whatever the
//! answer, the current page is refetched afterwards so the display converges on the
//! backend's state.

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use api::{HttpBackend, InMemoryBackend, JobsBackend};
pub use app::{handle_event, Action, Event, JobListController, JobListState};
pub use domain::{JobBoardError, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Environment variable overriding [`Config::api_base_url`].
pub const API_URL_ENV: &str = "JOBBOARD_API_URL";

/// Client configuration.
///
/// Loaded once at startup and passed by reference to every component that needs
/// it. Every field has a default, so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend API, without the `/jobs` suffix.
    ///
    /// Default: `http://localhost:5000/api`
    pub api_base_url: String,

    /// Jobs per listing page. Default: 10
    pub per_page: u32,

    /// Quiet window after the last filter edit before refetching. Default: 500
    pub debounce_ms: u64,

    /// Per-request timeout. Default: 30
    pub request_timeout_secs: u64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub log_level: Option<String>,

    /// Log to this file (rotated at 10 MB) instead of stderr. `~` is expanded.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            per_page: domain::DEFAULT_PER_PAGE,
            debounce_ms: 500,
            request_timeout_secs: 30,
            log_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Toml`] for malformed TOML and
    /// [`JobBoardError::Config`] for out-of-range values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jobboard::Config;
    ///
    /// let config = Config::from_toml_str("per_page = 25")?;
    /// assert_eq!(config.per_page, 25);
    /// assert_eq!(config.debounce_ms, 500);
    /// # Ok::<(), jobboard::JobBoardError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Resolves configuration for the binary.
    ///
    /// Reads `path` when given, else the default config file when it exists, else
    /// falls back to defaults. `JOBBOARD_API_URL` then overrides the API URL.
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly given or existing file cannot be read or
    /// parsed, or when the resulting values are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match infrastructure::default_config_file() {
                Some(default) if default.is_file() => {
                    tracing::debug!(path = %default.display(), "loading default config file");
                    Self::from_file(&default)?
                }
                _ => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(JobBoardError::Config(format!(
                "api_base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.per_page == 0 {
            return Err(JobBoardError::Config("per_page must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(JobBoardError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initializes logging and builds the HTTP backend described by `config`.
///
/// # Errors
///
/// Returns [`JobBoardError::Config`] when the API URL is unusable or the HTTP
/// client cannot be built.
pub fn initialize(config: &Config) -> Result<Arc<HttpBackend>> {
    observability::init_tracing(config);
    tracing::debug!(api_base_url = %config.api_base_url, per_page = config.per_page, "initializing jobboard");
    Ok(Arc::new(HttpBackend::from_config(config)?))
}
