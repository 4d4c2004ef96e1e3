//! Background worker for network I/O.
//!
//! This module implements the worker that performs all HTTP calls off the
//! event loop, answering each request message with exactly one response.
//! Network calls are never cancelled in flight; superseded responses are
//! discarded by the event handler's staleness check instead.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol types
//! - `handler`: worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::SearchWorker;
pub use messages::{WorkerMessage, WorkerResponse};
