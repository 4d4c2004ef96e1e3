//! Search method and application phase state types.
//!
//! This module defines the two small state machines that frame the search
//! flow: how the user is specifying a location, and which screen of the flow
//! they are on.

/// How the user is specifying the location to search for.
///
/// Switching methods resets transient search state (committed point, query
/// text, suggestion panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMethod {
    /// Free-text address input with autocompletion.
    #[default]
    Address,

    /// Manual latitude/longitude entry.
    Coordinates,

    /// Point picked by clicking a map.
    Map,
}

/// Which screen of the search flow is active.
///
/// Submission moves `Search` → `Loading`; a successful backend response moves
/// `Loading` → `Results`; a failed one falls back to `Search` with a
/// user-visible error string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Accepting input; suggestions may be visible.
    #[default]
    Search,

    /// A location search is in flight.
    Loading,

    /// A location report is being displayed.
    Results,
}
