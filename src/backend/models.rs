//! Request and response models for the backend search endpoint.
//!
//! The backend computes location statistics; this client consumes them as
//! opaque display data. The only structure imposed here is the request shape
//! and the success/error envelope.

use crate::domain::GeoPoint;
use serde::{Deserialize, Serialize};

/// Body POSTed to the backend search endpoint.
///
/// At least one of the fields must be set; the backend resolves coordinates
/// to a city when no name is given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationRequest {
    /// Point to search around, when the user picked one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,

    /// Free-text address, when searching by address without a resolved point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Explicit city name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl LocationRequest {
    /// Builds a request around a resolved point.
    #[must_use]
    pub fn for_point(point: GeoPoint) -> Self {
        Self {
            coordinates: Some(point),
            ..Self::default()
        }
    }

    /// Builds a request around a free-text address.
    #[must_use]
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Returns whether the request carries anything to search for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_none() && self.address.is_none() && self.city.is_none()
    }
}

/// Successful backend search response.
///
/// `stats` is deliberately untyped: its contents are backend-computed display
/// data whose shape is owned by the backend, not by this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    /// Backend-computed statistics bundle, passed through to display.
    pub stats: serde_json::Value,

    /// Optional AI-generated summary of the location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,

    /// Pre-rendered plain-text report.
    pub formatted_output: String,

    /// Server-side filename of the generated report.
    pub filename: String,
}

/// Error envelope the backend uses for rejected searches.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,

    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Flattens the envelope into a single user-facing message.
    pub(crate) fn into_message(self) -> String {
        match self.details {
            Some(details) => format!("{}: {}", self.error, details),
            None => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_only_set_fields() {
        let request = LocationRequest::for_point(GeoPoint::new(48.85, 2.35));
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("coordinates").is_some());
        assert!(json.get("address").is_none());
        assert!(json.get("city").is_none());
    }

    #[test]
    fn empty_request_is_detected() {
        assert!(LocationRequest::default().is_empty());
        assert!(!LocationRequest::for_address("Le Havre").is_empty());
    }

    #[test]
    fn report_decodes_with_opaque_stats() {
        let body = r#"{
            "stats": {"population": 170000, "type_ville": "ville"},
            "resume": "A mid-sized port city.",
            "formatted_output": "Le Havre\npopulation: 170000",
            "filename": "CostIAData_49.49,0.10_Le_Havre.txt"
        }"#;
        let report: LocationReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.stats["population"], 170_000);
        assert_eq!(report.resume.as_deref(), Some("A mid-sized port city."));
    }

    #[test]
    fn report_resume_is_optional() {
        let body = r#"{
            "stats": {},
            "formatted_output": "",
            "filename": "out.txt"
        }"#;
        let report: LocationReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.resume, None);
    }

    #[test]
    fn error_body_flattens_details() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Data file not found", "details": "Unemployed.csv"}"#)
                .unwrap();
        assert_eq!(body.into_message(), "Data file not found: Unemployed.csv");
    }
}
