//! Locus: the client core of a location-search application.
//!
//! A user types an address (or enters coordinates, or clicks a map), the app
//! offers autocompleted suggestions, and on submission fetches location
//! statistics (population, amenities, employment, risk scores, generated
//! summary) from a backend search endpoint. Both the geocoding completion
//! service and the statistics backend are external collaborators accessed
//! over HTTP; locus consumes them, it does not reproduce them.
//!
//! The heart of the crate is the **suggestion-search coalescer**
//! ([`app::coalescer`]): the policy that turns a rapid stream of keystrokes
//! into a rate-limited, superseding sequence of lookups with at-most-one
//! pending "latest" query, and reconciles out-of-order network responses
//! with current state.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime Shim (main.rs)                             │  ← Event loop, timer,
//! └─────────────────────────────────────────────────────┘    worker thread
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Coalescing policy
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!         │                            │
//! ┌───────────────────┐   ┌─────────────────────────────┐
//! │ Worker Layer      │   │ Collaborator Clients        │
//! │ (worker/)         │──▶│ (geocoding/, backend/)      │
//! │ - Network I/O     │   │ - Completion lookups        │
//! │ - Msg protocol    │   │ - Location searches         │
//! └───────────────────┘   └─────────────────────────────┘
//!         │                            │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Suggestion model, query sanitation, errors       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber setup                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model and the
//!   suggestion-search coalescer
//! - [`domain`]: Core domain types (suggestions, points, query rules, errors)
//! - [`geocoding`]: Completion-service client and kind policy
//! - [`backend`]: Location-statistics client
//! - [`worker`]: Background worker and its message protocol
//! - [`observability`]: tracing subscriber setup
//!
//! # Event Flow
//!
//! 1. The runtime translates raw input into [`app::Event`] values
//! 2. [`app::handle_event`] mutates [`app::AppState`] and returns
//!    [`app::Action`]s
//! 3. The runtime executes actions: arming the single suggestion timer or
//!    posting [`worker::WorkerMessage`]s to the worker thread
//! 4. Timer fires and [`worker::WorkerResponse`]s come back as events
//!
//! # Example
//!
//! ```rust
//! use locus::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (rerender, actions) =
//!     handle_event(&mut state, &Event::InputChanged("8 rue Riquet, Paris".into()))?;
//!
//! // The first searchable input dispatches immediately; the runtime now
//! // executes the returned actions.
//! assert!(!rerender);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), locus::domain::LocusError>(())
//! ```

pub mod app;
pub mod backend;
pub mod domain;
pub mod geocoding;
pub mod observability;
pub mod worker;

pub use app::{handle_event, Action, AppPhase, AppState, Event, SearchMethod};
pub use domain::{GeoPoint, LocusError, Result, Suggestion, SuggestionKind};

use geocoding::KindPolicy;
use serde::Deserialize;
use std::path::Path;

/// Default base URL of the geocoding completion service.
pub const DEFAULT_GEOCODER_URL: &str = "https://data.geopf.fr/geocodage";

/// Default base URL of the statistics backend.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Client configuration.
///
/// Loaded from a TOML file and/or command-line flags; every field has a
/// default so an empty configuration is valid. The throttle window and the
/// minimum query length are fixed constants of the coalescer, not
/// configuration.
///
/// # Example
///
/// ```toml
/// # locus.toml
/// geocoder_url = "https://data.geopf.fr/geocodage"
/// backend_url = "http://localhost:8000"
/// kind_policy = "addresses"
/// max_suggestions = 10
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the geocoding completion service.
    pub geocoder_url: String,

    /// Base URL of the statistics backend.
    pub backend_url: String,

    /// Which completion feature kinds are accepted as suggestions.
    ///
    /// `all` accepts everything the service returns; `addresses` restricts
    /// to housenumber/street results.
    pub kind_policy: KindPolicy,

    /// Bound on the number of published suggestions.
    pub max_suggestions: usize,

    /// Tracing level for the subscriber.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    /// Overridable at runtime via the `LOCUS_LOG` environment variable.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            kind_policy: KindPolicy::default(),
            max_suggestions: app::state::DEFAULT_MAX_SUGGESTIONS,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Unknown keys are ignored; missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as
    /// TOML matching the configuration shape.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;

        toml::from_str(&raw).map_err(|e| {
            LocusError::Config(format!("{}: {e}", path.display()))
        })
    }
}

/// Initializes the application state from configuration.
///
/// Creates a pristine [`AppState`] with a wall-clock coalescer and the
/// configured suggestion bound, ready for event processing. Tracing is not
/// initialized here; call [`observability::init_tracing`] separately.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        geocoder_url = %config.geocoder_url,
        backend_url = %config.backend_url,
        "initializing search state"
    );

    AppState::new(app::SuggestionCoalescer::new(), config.max_suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_complete() {
        let config = Config::default();
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
        assert_eq!(config.max_suggestions, 10);
        assert_eq!(config.kind_policy, KindPolicy::All);
    }

    #[test]
    fn config_loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "backend_url = \"http://stats.internal:9000\"\nkind_policy = \"addresses\"\nmax_suggestions = 5"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.backend_url, "http://stats.internal:9000");
        assert_eq!(config.kind_policy, KindPolicy::Addresses);
        assert_eq!(config.max_suggestions, 5);
        // Unset keys keep their defaults.
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn invalid_config_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_suggestions = \"lots\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, LocusError::Config(_)));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = Config::from_file("/nonexistent/locus.toml").unwrap_err();
        assert!(matches!(err, LocusError::Io(_)));
    }
}
