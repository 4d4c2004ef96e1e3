//! Application state management.
//!
//! This module defines [`AppState`], the central state container for the
//! search client, along with the mutators the event handler uses for
//! suggestion publication, selection and flow resets. It is the single source
//! of truth for all transient UI-facing state.
//!
//! # State Components
//!
//! - **Phase / method**: which screen is active and how the location is
//!   being specified
//! - **Query text**: the raw input as typed, or the committed address after
//!   a selection
//! - **Current query**: the latest searchable sanitized query; the staleness
//!   reference for suggestion responses
//! - **Suggestions**: the published list plus panel visibility
//! - **Selected point**: coordinates adopted from a suggestion, manual entry
//!   or map click
//! - **Report / error**: outcome of the last location search

use super::coalescer::SuggestionCoalescer;
use super::modes::{AppPhase, SearchMethod};
use crate::backend::LocationReport;
use crate::domain::{GeoPoint, Suggestion};

/// Default bound on the number of published suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

/// Central application state container.
///
/// Mutated by the event handler in response to user input, timer fires and
/// worker responses. Owns the suggestion coalescer; all of its throttle state
/// lives here rather than in globals.
#[derive(Debug)]
pub struct AppState {
    /// Which screen of the search flow is active.
    pub phase: AppPhase,

    /// How the user is specifying the location.
    pub search_method: SearchMethod,

    /// The query text as typed, or the committed address after a selection.
    pub address: String,

    /// The latest searchable sanitized query.
    ///
    /// Suggestion responses are published only if their originating query
    /// still equals this value; anything else is a stale response and is
    /// discarded. `None` whenever no lookup is current (short input,
    /// selection, submission, reset).
    pub current_query: Option<String>,

    /// The published suggestion list, bounded to `max_suggestions`.
    pub suggestions: Vec<Suggestion>,

    /// Whether the suggestion panel is visible.
    ///
    /// Shown iff the last completed search produced a non-empty list and
    /// nothing has hidden it since.
    pub show_suggestions: bool,

    /// Coordinates to search, adopted from a suggestion, manual entry or a
    /// map click.
    pub selected_point: Option<GeoPoint>,

    /// Outcome of the last successful location search.
    pub report: Option<LocationReport>,

    /// User-visible error from the last failed location search.
    pub error: Option<String>,

    /// The throttle/coalesce state machine for suggestion lookups.
    pub coalescer: SuggestionCoalescer,

    /// Bound on the number of published suggestions.
    pub max_suggestions: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SuggestionCoalescer::new(), DEFAULT_MAX_SUGGESTIONS)
    }
}

impl AppState {
    /// Creates a pristine search state around the given coalescer.
    ///
    /// Tests pass a coalescer with a manual clock; production uses
    /// [`AppState::default`].
    #[must_use]
    pub fn new(coalescer: SuggestionCoalescer, max_suggestions: usize) -> Self {
        Self {
            phase: AppPhase::Search,
            search_method: SearchMethod::Address,
            address: String::new(),
            current_query: None,
            suggestions: Vec::new(),
            show_suggestions: false,
            selected_point: None,
            report: None,
            error: None,
            coalescer,
            max_suggestions,
        }
    }

    /// Publishes a completed suggestion lookup.
    ///
    /// Bounds the list to `max_suggestions`; the panel is visible iff the
    /// bounded list is non-empty.
    pub fn publish_suggestions(&mut self, mut suggestions: Vec<Suggestion>) {
        suggestions.truncate(self.max_suggestions);
        self.show_suggestions = !suggestions.is_empty();
        self.suggestions = suggestions;

        tracing::debug!(
            count = self.suggestions.len(),
            visible = self.show_suggestions,
            "suggestions published"
        );
    }

    /// Empties the suggestion list and hides the panel.
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.show_suggestions = false;
    }

    /// Commits the suggestion at `index` as the search target.
    ///
    /// Sets the committed query text to the suggestion's full address, hides
    /// the panel, clears the list, adopts the suggestion's coordinates when
    /// present, and cancels any pending deferred lookup so that selection
    /// wins over an in-flight timer. Returns `false` if the index is out of
    /// bounds.
    pub fn apply_selection(&mut self, index: usize) -> bool {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            tracing::debug!(index, "selection index out of bounds");
            return false;
        };

        tracing::debug!(
            address = %suggestion.full_address,
            has_coordinates = suggestion.coordinates.is_some(),
            "suggestion selected"
        );

        self.address = suggestion.full_address;
        if let Some(point) = suggestion.coordinates {
            self.selected_point = Some(point);
        }

        self.current_query = None;
        self.clear_suggestions();
        self.coalescer.cancel_pending();
        true
    }

    /// Clears the state tied to the in-progress search input.
    ///
    /// Used when the search method changes: committed point, query text,
    /// suggestions and the staleness reference all reset, and any deferred
    /// lookup is cancelled.
    pub fn reset_transient(&mut self) {
        self.address.clear();
        self.current_query = None;
        self.selected_point = None;
        self.clear_suggestions();
        self.coalescer.cancel_pending();
    }

    /// Returns the whole flow to a pristine search phase.
    pub fn reset_search(&mut self) {
        self.phase = AppPhase::Search;
        self.search_method = SearchMethod::Address;
        self.report = None;
        self.error = None;
        self.reset_transient();
    }

    /// Scoped cleanup for disposal.
    ///
    /// Tears down the coalescer so no stale timer dispatches after the
    /// consumer is gone. The runtime must also drop its timer handle.
    pub fn teardown(&mut self) {
        self.coalescer.teardown();
        self.current_query = None;
    }
}
