//! Error types for the locus client core.
//!
//! This module defines the centralized error type [`LocusError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for locus operations.
///
/// This enum consolidates all error conditions that can occur while talking to
/// the external collaborators (geocoding completion service, backend search
/// endpoint) and while loading configuration. Transport and decoding variants
/// wrap underlying errors from external crates using `#[from]` for automatic
/// conversion.
///
/// Note that suggestion-fetch failures never reach the user as errors: the
/// worker boundary absorbs them into an empty-suggestions response. Only the
/// main location search surfaces an error string.
#[derive(Debug, Error)]
pub enum LocusError {
    /// HTTP transport failed (connection, timeout, TLS, ...).
    ///
    /// Wraps errors from the `reqwest` client. Automatically converts from
    /// `reqwest::Error` using the `#[from]` attribute.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body could not be decoded into the expected shape.
    ///
    /// Wraps `serde_json` errors raised while decoding geocoding features or
    /// backend reports.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The geocoding completion service answered with a non-success payload.
    ///
    /// The string contains the status or diagnostic reported by the service.
    #[error("Geocoding error: {0}")]
    Geocoding(String),

    /// The backend search endpoint rejected the request.
    ///
    /// Carries the backend-provided error message, surfaced verbatim to the
    /// user after a failed location search.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, e.g. while reading
    /// a configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when the event loop cannot reach its worker thread, typically
    /// because the channel closed during shutdown.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for locus operations.
///
/// This is a type alias for `std::result::Result<T, LocusError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, LocusError>;
