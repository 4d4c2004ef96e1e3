//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! worker responses. Actions bridge pure state transformations and effectful
//! operations: arming the suggestion timer and talking to the background
//! worker.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The runtime
//! executes them in sequence.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
///
/// Actions are produced by the event handler and executed by the runtime
/// shim. They represent the boundary between pure state transformations and
/// effectful operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Arms the single suggestion timer, replacing any timer armed earlier.
    ///
    /// When it fires, the runtime feeds the query back as
    /// [`Event::SuggestionTimer`](crate::app::Event::SuggestionTimer). At most
    /// one suggestion timer is alive at any time: arming is replace-then-arm.
    ArmSuggestionTimer {
        /// Sanitized query the timer is armed for.
        query: String,
        /// Delay until fire, in milliseconds.
        delay_ms: i64,
    },

    /// Cancels the suggestion timer if one is armed.
    ///
    /// Emitted when input drops below the search threshold and on teardown.
    /// A runtime that cannot cancel may simply let the timer fire; the
    /// staleness check makes the fire a no-op.
    CancelSuggestionTimer,

    /// Posts a message to the background worker thread.
    ///
    /// All network I/O (suggestion lookups, location searches) happens on the
    /// worker so the event loop never blocks.
    PostToWorker(WorkerMessage),
}
