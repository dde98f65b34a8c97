//! Presentation contract and plain-text rendering.
//!
//! This module holds the framework-independent half of the user interface: view
//! models computed from application state, and a renderer that turns them into
//! text for the command-line front end.
//!
//! ```text
//! JobListState → compute_viewmodel → JobListViewModel → render_job_list → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Text rendering of list and detail views
//! - [`helpers`]: Date formatting and truncation

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_job_detail, render_job_list};
pub use viewmodel::{EmptyState, JobCard, JobDetailViewModel, JobListViewModel};
