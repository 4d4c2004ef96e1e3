//! Backend search collaborator.
//!
//! The location-intelligence backend (scoring, amenity aggregation, summary
//! generation) is an external collaborator accessed over HTTP; this module
//! only shapes requests and resolves the response envelope.
//!
//! - `client`: blocking HTTP client for the search endpoint
//! - `models`: request body, report and error envelope types

pub mod client;
pub mod models;

pub use client::BackendClient;
pub use models::{LocationReport, LocationRequest};
