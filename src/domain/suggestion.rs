//! Suggestion domain model.
//!
//! This module defines the core [`Suggestion`] type: a candidate address or
//! location offered for user selection during typed search. Suggestions are
//! produced only from decoded geocoding features and are immutable once
//! created; the whole list is superseded by the next completed search or by a
//! selection.

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
///
/// Latitude is positive north, longitude positive east (WGS 84). This is the
/// crate-wide coordinate convention; the geocoding layer normalizes the
/// provider's `x`/`y` axis order into it at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in decimal degrees.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Classification of a suggestion, used for display grouping.
///
/// Provider feature kinds are folded into these four categories; anything
/// unrecognized becomes [`SuggestionKind::Coordinates`], the catch-all for
/// "a point on the map without a richer classification".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// A populated place (city, town, village).
    City,
    /// A street or an addressable point on one (house number).
    Street,
    /// A named point of interest.
    Landmark,
    /// A bare coordinate result or an unclassified feature.
    Coordinates,
}

impl SuggestionKind {
    /// Folds a provider feature kind string into a suggestion kind.
    ///
    /// The completion service reports fine-grained kinds (`housenumber`,
    /// `street`, `municipality`, `poi`, ...); display only distinguishes the
    /// four [`SuggestionKind`] categories.
    #[must_use]
    pub fn from_feature_kind(kind: &str) -> Self {
        match kind {
            "municipality" | "city" | "town" | "village" | "commune" => Self::City,
            "housenumber" | "street" | "locality" => Self::Street,
            "poi" | "landmark" => Self::Landmark,
            _ => Self::Coordinates,
        }
    }
}

/// A candidate address/location result offered for user selection.
///
/// Produced by the geocoding layer from decoded completion features. The
/// `id` is the feature's position within its response and is only meaningful
/// relative to the list it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Position of the feature within the completion response.
    pub id: usize,

    /// Display category of the result.
    pub kind: SuggestionKind,

    /// Full display string for the result, committed verbatim on selection.
    pub full_address: String,

    /// Resolved coordinates, when the provider supplied them.
    ///
    /// Selecting a suggestion with coordinates adopts them as the search
    /// point; selecting one without leaves the point untouched.
    pub coordinates: Option<GeoPoint>,
}
