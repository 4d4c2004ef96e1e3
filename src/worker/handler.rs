//! Background worker for network operations.
//!
//! This module implements the worker that owns the HTTP clients and handles
//! all network I/O, keeping the event loop responsive. Clients are
//! initialized lazily on first use so that constructing the worker is
//! infallible and configuration problems surface as ordinary responses.

use crate::backend::{BackendClient, LocationRequest};
use crate::domain::error::{LocusError, Result};
use crate::geocoding::GeocodingClient;
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::Config;

/// Worker state owning the collaborator HTTP clients.
///
/// Runs on a dedicated thread spawned by the runtime and processes messages
/// sent from the event loop, answering each with exactly one response.
pub struct SearchWorker {
    config: Config,

    /// Completion client, initialized lazily on first suggestion fetch.
    geocoding: Option<GeocodingClient>,

    /// Backend client, initialized lazily on first location search.
    backend: Option<BackendClient>,
}

impl SearchWorker {
    /// Creates a worker around the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            geocoding: None,
            backend: None,
        }
    }

    /// Returns the completion client, building it on first use.
    fn geocoding(&mut self) -> Result<&GeocodingClient> {
        if self.geocoding.is_none() {
            let client =
                GeocodingClient::new(self.config.geocoder_url.clone(), self.config.kind_policy)?;
            self.geocoding = Some(client);
        }
        self.geocoding
            .as_ref()
            .ok_or_else(|| LocusError::Worker("geocoding client unavailable".to_string()))
    }

    /// Returns the backend client, building it on first use.
    fn backend(&mut self) -> Result<&BackendClient> {
        if self.backend.is_none() {
            self.backend = Some(BackendClient::new(self.config.backend_url.clone())?);
        }
        self.backend
            .as_ref()
            .ok_or_else(|| LocusError::Worker("backend client unavailable".to_string()))
    }

    /// Extracts the user-facing message from a search failure.
    ///
    /// Backend rejections carry their own message; everything else falls
    /// back to the error's display form.
    fn failure_message(error: &LocusError) -> String {
        match error {
            LocusError::Backend(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Handles the `FetchSuggestions` message.
    ///
    /// Failures become [`WorkerResponse::SuggestionsFailed`], which the event
    /// handler soft-fails into an empty list; nothing propagates.
    fn handle_fetch_suggestions(&mut self, query: String) -> WorkerResponse {
        let result = self
            .geocoding()
            .and_then(|client| client.complete(&query));

        match result {
            Ok(suggestions) => {
                tracing::debug!(query = %query, count = suggestions.len(), "suggestion fetch succeeded");
                WorkerResponse::SuggestionsLoaded { query, suggestions }
            }
            Err(e) => {
                tracing::debug!(query = %query, error = %e, "suggestion fetch failed");
                WorkerResponse::SuggestionsFailed {
                    query,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Handles the `FetchLocation` message.
    fn handle_fetch_location(&mut self, request: LocationRequest) -> WorkerResponse {
        let result = self.backend().and_then(|client| client.search(&request));

        match result {
            Ok(report) => {
                tracing::debug!(filename = %report.filename, "location search succeeded");
                WorkerResponse::LocationLoaded { report }
            }
            Err(e) => {
                tracing::debug!(error = %e, "location search failed");
                WorkerResponse::LocationFailed {
                    message: Self::failure_message(&e),
                }
            }
        }
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::FetchSuggestions { query } => self.handle_fetch_suggestions(query),
            WorkerMessage::FetchLocation { request } => self.handle_fetch_location(request),
        }
    }
}
