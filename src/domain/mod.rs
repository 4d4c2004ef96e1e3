//! Domain layer for the locus client core.
//!
//! This module contains the core domain types and business rules for the
//! search client, independent of transport or runtime concerns. It follows
//! domain-driven design principles by keeping the data model isolated from
//! external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`query`]: Input sanitation and the minimum-length search guard
//! - [`suggestion`]: Suggestion model, kinds, and geographic points
//!
//! # Examples
//!
//! ```
//! use locus::domain::{query, GeoPoint, Suggestion, SuggestionKind};
//!
//! let q = query::sanitize("Paris, 7e");
//! assert!(query::is_searchable(&q));
//!
//! let s = Suggestion {
//!     id: 0,
//!     kind: SuggestionKind::City,
//!     full_address: "Paris".to_string(),
//!     coordinates: Some(GeoPoint::new(48.85, 2.35)),
//! };
//! assert_eq!(s.full_address, "Paris");
//! ```

pub mod error;
pub mod query;
pub mod suggestion;

pub use error::{LocusError, Result};
pub use suggestion::{GeoPoint, Suggestion, SuggestionKind};
