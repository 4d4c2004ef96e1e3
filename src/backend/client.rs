//! HTTP client for the backend location-statistics endpoint.
//!
//! Issues `POST {base}/api/location-info/` and resolves the dynamic response
//! shape at this boundary: a 2xx body decodes to a [`LocationReport`], a
//! non-2xx body with an `{error, details?}` envelope becomes the error
//! message. Nothing downstream ever inspects the raw response.

use crate::domain::error::{LocusError, Result};
use std::time::Duration;

use super::models::{ErrorBody, LocationReport, LocationRequest};

/// Request timeout for location searches.
///
/// The backend aggregates several datasets and may call out to a language
/// model for the summary, so this is generous.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking HTTP client for the backend search endpoint.
///
/// Owned by the background worker; the event loop never calls it directly.
#[derive(Debug)]
pub struct BackendClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Runs a location search.
    ///
    /// # Errors
    ///
    /// Returns [`LocusError::Backend`] with the backend's own message when
    /// the search is rejected, [`LocusError::Http`] on transport failure, and
    /// [`LocusError::Decode`] if a success body does not match the report
    /// shape. The handler surfaces the message to the user; there are no
    /// retries.
    pub fn search(&self, request: &LocationRequest) -> Result<LocationReport> {
        let url = format!("{}/api/location-info/", self.base_url);

        tracing::debug!(
            url = %url,
            has_coordinates = request.coordinates.is_some(),
            has_address = request.address.is_some(),
            "running location search"
        );

        let response = self.http.post(&url).json(request).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(ErrorBody::into_message)
                .unwrap_or_else(|_| format!("search failed with status {status}"));
            return Err(LocusError::Backend(message));
        }

        let report: LocationReport = serde_json::from_str(&body)?;

        tracing::debug!(filename = %report.filename, "location report received");

        Ok(report)
    }
}
