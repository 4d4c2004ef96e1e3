//! Observability for the search client.
//!
//! Structured `tracing` spans and events are emitted throughout the handler,
//! coalescer, worker and collaborator clients; this module installs the
//! subscriber that collects them.

pub mod init;

pub use init::init_tracing;
