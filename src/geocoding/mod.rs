//! Geocoding completion collaborator.
//!
//! The external address-completion service is consumed, never reproduced:
//! this module only issues lookups and normalizes the wire format into domain
//! [`Suggestion`](crate::domain::Suggestion)s.
//!
//! - `client`: blocking HTTP client and the configurable kind policy
//! - `response`: wire types for the completion envelope

pub mod client;
pub mod response;

pub use client::{GeocodingClient, KindPolicy};
