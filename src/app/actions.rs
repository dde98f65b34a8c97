//! Actions representing side effects to be executed by the list controller.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or worker responses.
//! Actions bridge pure state transformations and effectful operations like
//! arming the debounce timer or calling the backend.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. [`super::JobListController`]
//! executes them in order.
//!
//! # Example
//!
//! ```rust
//! use jobboard::app::Action;
//! use jobboard::domain::FilterState;
//! use jobboard::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::fetch_page(1, FilterState::default(), 1, 10)),
//! ];
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the controller.
///
/// Actions are produced by the event handler and executed by the controller. They
/// represent the boundary between pure state transformations and effectful
/// operations like timers and backend calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// (Re)arms the debounce timer.
    ///
    /// When the quiet window elapses without another filter edit, the controller
    /// feeds `Event::DebounceElapsed` back into the handler. A later edit
    /// supersedes the pending timer.
    ScheduleDebounce,

    /// Posts a message to the worker.
    ///
    /// Used for listing and deletion requests. The worker's answer comes back as
    /// `Event::Worker`.
    PostToWorker(WorkerMessage),
}
