//! Backend layer: the REST collection the client reads from and writes to.
//!
//! # Modules
//!
//! - [`backend`]: The [`JobsBackend`] trait
//! - [`http`]: `reqwest` client for the real service
//! - [`memory`]: In-process backend with the same listing semantics

pub mod backend;
pub mod http;
pub mod memory;

pub use backend::JobsBackend;
pub use http::HttpBackend;
pub use memory::InMemoryBackend;
