//! HTTP client for the address-completion service.
//!
//! Issues `GET {base}/completion?text=<query>` against the external geocoding
//! provider and maps the ranked features into domain [`Suggestion`]s. Which
//! feature kinds survive is a configurable [`KindPolicy`], not a hard-coded
//! filter.

use crate::domain::error::{LocusError, Result};
use crate::domain::{GeoPoint, Suggestion, SuggestionKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::response::{CompletionFeature, CompletionResponse};

/// Request timeout for completion lookups.
///
/// Suggestion fetches are fire-and-forget from the UI's point of view; a
/// lookup that takes this long is worthless anyway.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(5);

/// Which completion feature kinds are accepted as suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindPolicy {
    /// Accept every feature the service returns.
    #[default]
    All,

    /// Accept only addressable results (`housenumber` and `street`).
    Addresses,
}

impl KindPolicy {
    /// Returns whether a provider feature kind passes the policy.
    #[must_use]
    pub fn accepts(self, kind: &str) -> bool {
        match self {
            Self::All => true,
            Self::Addresses => matches!(kind, "housenumber" | "street"),
        }
    }
}

/// Blocking HTTP client for the completion endpoint.
///
/// Owned by the background worker; the event loop never calls it directly.
#[derive(Debug)]
pub struct GeocodingClient {
    http: reqwest::blocking::Client,
    base_url: String,
    policy: KindPolicy,
}

impl GeocodingClient {
    /// Creates a client for the completion service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, policy: KindPolicy) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// Looks up completion suggestions for a sanitized query.
    ///
    /// Decodes the response envelope, applies the kind policy, and maps the
    /// surviving features into [`Suggestion`]s in service ranking order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success HTTP status, an
    /// undecodable body, or a non-`OK` service status. Callers at the worker
    /// boundary absorb all of these into an empty-suggestions soft-fail.
    pub fn complete(&self, query: &str) -> Result<Vec<Suggestion>> {
        let url = format!("{}/completion", self.base_url);

        tracing::debug!(query = %query, url = %url, "fetching completion suggestions");

        let response = self
            .http
            .get(&url)
            .query(&[("text", query)])
            .send()?
            .error_for_status()?;

        let body: CompletionResponse = response.json()?;

        if body.status != "OK" {
            return Err(LocusError::Geocoding(format!(
                "completion service status: {}",
                body.status
            )));
        }

        let suggestions = map_features(body.results, self.policy);

        tracing::debug!(count = suggestions.len(), "completion suggestions decoded");

        Ok(suggestions)
    }
}

/// Maps decoded completion features into domain suggestions.
///
/// Features rejected by the kind policy are dropped; the survivors keep the
/// service's ranking order and are numbered by it. The provider reports
/// `x` = longitude and `y` = latitude; both must be present for a suggestion
/// to carry coordinates.
pub(crate) fn map_features(features: Vec<CompletionFeature>, policy: KindPolicy) -> Vec<Suggestion> {
    features
        .into_iter()
        .filter(|feature| policy.accepts(&feature.kind))
        .enumerate()
        .map(|(id, feature)| Suggestion {
            id,
            kind: SuggestionKind::from_feature_kind(&feature.kind),
            full_address: feature.fulltext,
            coordinates: match (feature.x, feature.y) {
                (Some(x), Some(y)) => Some(GeoPoint { lat: y, lon: x }),
                _ => None,
            },
        })
        .collect()
}
