//! Background worker for backend I/O.
//!
//! The list state machine never awaits the network itself. It emits
//! [`WorkerMessage`]s; the controller runs them through [`JobWorker`] and feeds the
//! resulting [`WorkerResponse`]s back in as events.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{JobWorker, DELETE_FALLBACK_MESSAGE, FETCH_FALLBACK_MESSAGE};
pub use messages::{WorkerMessage, WorkerResponse};
