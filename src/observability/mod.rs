//! Logging setup built on `tracing` and `tracing-subscriber`.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr | FileWriter (rotating)
//! ```
//!
//! # Features
//!
//! - **Level control**: `RUST_LOG` first, then `log_level` from the config, default `info`
//! - **File output**: optional `log_file`, rotated at 10MB with 3-backup retention
//! - **Spans**: `handle_event` and worker message handling run inside debug spans
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
