//! Application layer coordinating list state, events, and actions.
//!
//! This module sits between the front end (main.rs or any embedding UI) and the
//! domain/worker layers. It implements the event-driven list workflow plus the
//! one-shot detail and editor workflows.
//!
//! # Architecture
//!
//! The list follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: List state container and view model computation
//! - [`debounce`]: Trailing-edge timer collapsing bursts of filter edits
//! - [`controller`]: Async runtime executing actions and publishing view models
//! - [`detail`]: Single-job view workflow
//! - [`editor`]: Create and edit workflows
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::{handle_event, Event, JobListState};
//!
//! let mut state = JobListState::default();
//! let (changed, actions) = handle_event(&mut state, &Event::PageSelected(2))?;
//! assert!(changed);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), jobboard::domain::JobBoardError>(())
//! ```

pub mod actions;
pub mod controller;
pub mod debounce;
pub mod detail;
pub mod editor;
pub mod handler;
pub mod state;

pub use actions::Action;
pub use controller::{AlwaysConfirm, ConfirmationGate, DeleteOutcome, JobListController};
pub use debounce::DebounceGate;
pub use detail::{delete_from_detail, load_job_detail};
pub use editor::{create_job, replace_job};
pub use handler::{handle_event, Event};
pub use state::JobListState;
