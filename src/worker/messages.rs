//! Worker message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the event
//! loop and the background worker that performs all network I/O. Suggestion
//! responses carry their originating query so the handler can discard results
//! for a query that is no longer current.

use crate::backend::{LocationReport, LocationRequest};
use crate::domain::Suggestion;
use serde::{Deserialize, Serialize};

/// Messages sent from the event loop to the worker.
///
/// Each variant corresponds to one network operation that must not block the
/// event loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Look up completion suggestions for a sanitized query.
    FetchSuggestions {
        /// The dispatched query.
        query: String,
    },

    /// Run a location search against the backend.
    FetchLocation {
        /// What to search for.
        request: LocationRequest,
    },
}

/// Responses sent from the worker back to the event loop.
///
/// Suggestion failures are a distinct variant rather than an error: the
/// handler soft-fails them into an empty list, and nothing propagates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A completion lookup finished.
    SuggestionsLoaded {
        /// The query the suggestions belong to; stale queries are discarded.
        query: String,

        /// Decoded suggestions in service ranking order, unbounded; the
        /// handler applies the publication bound.
        suggestions: Vec<Suggestion>,
    },

    /// A completion lookup failed.
    SuggestionsFailed {
        /// The query the failure belongs to.
        query: String,

        /// Diagnostic for logging; never shown to the user.
        message: String,
    },

    /// A location search succeeded.
    LocationLoaded {
        /// The backend's report.
        report: LocationReport,
    },

    /// A location search failed.
    LocationFailed {
        /// User-visible error message.
        message: String,
    },
}
