//! Wire types for the completion service response.
//!
//! Only the fields the client consumes are modeled; the service sends more
//! (zipcode, classification, ...) and serde ignores them.

use serde::Deserialize;

/// Top-level completion response envelope.
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    /// Service-reported status; `"OK"` on success.
    pub status: String,

    /// Ranked completion features, best match first.
    #[serde(default)]
    pub results: Vec<CompletionFeature>,
}

/// One completion feature.
///
/// The provider's documented axis order is `x` = longitude, `y` = latitude;
/// the client normalizes it into the crate-wide `lat`/`lon` convention.
#[derive(Debug, Deserialize)]
pub struct CompletionFeature {
    /// Fine-grained feature kind (`housenumber`, `street`, `municipality`, ...).
    pub kind: String,

    /// Full display string for the feature.
    pub fulltext: String,

    /// Longitude in decimal degrees, when resolved.
    #[serde(default)]
    pub x: Option<f64>,

    /// Latitude in decimal degrees, when resolved.
    #[serde(default)]
    pub y: Option<f64>,
}
