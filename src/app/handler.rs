//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer fires and worker responses, translating them into state changes and
//! action sequences. It is the primary control flow coordinator of the
//! search client.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the runtime (input, timers, worker responses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods and the coalescer
//! 4. Actions are collected and returned for execution
//!
//! # Staleness
//!
//! The only "concurrency" hazard in the single-threaded runtime is a timer
//! fire or a network response arriving for a query that is no longer
//! current. Both are handled by equality checks: the coalescer's pending
//! marker for timers, `AppState::current_query` for responses. Neither path
//! can surface an error to the user.

use crate::app::{Action, AppState};
use crate::backend::LocationRequest;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

use super::coalescer::InputDirective;
use super::modes::{AppPhase, SearchMethod};

/// Events triggered by user input, the suggestion timer, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search input text changed.
    InputChanged(String),

    /// The suggestion timer armed for `query` fired.
    SuggestionTimer {
        /// The query the timer was armed for.
        query: String,
    },

    /// The user picked the suggestion at `index` in the published list.
    SuggestionSelected(usize),

    /// The suggestion panel was dismissed without selecting (click-outside).
    DismissSuggestions,

    /// The user switched how the location is specified.
    MethodChanged(SearchMethod),

    /// The user entered coordinates manually.
    ///
    /// Values are raw input strings; unparsable input is a silent no-op on
    /// the selected point.
    CoordinatesEntered {
        /// Latitude input text.
        lat: String,
        /// Longitude input text.
        lon: String,
    },

    /// The user clicked a point on the map.
    MapClicked {
        /// Latitude in decimal degrees.
        lat: f64,
        /// Longitude in decimal degrees.
        lon: f64,
    },

    /// The user submitted the search.
    Submit,

    /// The user returned to a fresh search.
    Reset,

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects. It pattern-matches on event types, calls state mutation
/// methods, and collects actions to be executed by the runtime.
///
/// # Returns
///
/// A tuple of (should re-render, actions to execute in sequence). The action
/// vector may be empty if the event requires no side effects.
///
/// # Errors
///
/// Reserved for state mutation failures; every current transition is
/// infallible, and in particular no network failure ever surfaces here as an
/// error.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::InputChanged(raw) => {
            if state.phase != AppPhase::Search {
                return Ok((false, vec![]));
            }

            // Typing that diverges from a committed selection invalidates
            // the point adopted from it.
            if state.address != *raw {
                state.selected_point = None;
            }
            state.address = raw.clone();

            match state.coalescer.on_input_changed(raw) {
                InputDirective::Clear => {
                    state.current_query = None;
                    state.clear_suggestions();
                    Ok((true, vec![Action::CancelSuggestionTimer]))
                }
                InputDirective::Dispatch { query } => {
                    state.current_query = Some(query.clone());
                    Ok((
                        false,
                        vec![Action::PostToWorker(WorkerMessage::FetchSuggestions { query })],
                    ))
                }
                InputDirective::ArmTimer { query, delay_ms } => {
                    state.current_query = Some(query.clone());
                    Ok((false, vec![Action::ArmSuggestionTimer { query, delay_ms }]))
                }
            }
        }

        Event::SuggestionTimer { query } => {
            match state.coalescer.on_timer_fired(query) {
                Some(query) => Ok((
                    false,
                    vec![Action::PostToWorker(WorkerMessage::FetchSuggestions { query })],
                )),
                None => Ok((false, vec![])),
            }
        }

        Event::SuggestionSelected(index) => {
            if state.apply_selection(*index) {
                Ok((true, vec![Action::CancelSuggestionTimer]))
            } else {
                Ok((false, vec![]))
            }
        }

        Event::DismissSuggestions => {
            if state.show_suggestions {
                state.show_suggestions = false;
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }

        Event::MethodChanged(method) => {
            if state.search_method == *method {
                return Ok((false, vec![]));
            }

            tracing::debug!(method = ?method, "search method changed");
            state.search_method = *method;
            state.reset_transient();
            Ok((true, vec![Action::CancelSuggestionTimer]))
        }

        Event::CoordinatesEntered { lat, lon } => {
            match (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                (Ok(lat), Ok(lon)) => {
                    state.selected_point = Some(crate::domain::GeoPoint::new(lat, lon));
                    Ok((true, vec![]))
                }
                _ => {
                    tracing::debug!(lat = %lat, lon = %lon, "unparsable coordinate input");
                    Ok((false, vec![]))
                }
            }
        }

        Event::MapClicked { lat, lon } => {
            state.selected_point = Some(crate::domain::GeoPoint::new(*lat, *lon));
            Ok((true, vec![]))
        }

        Event::Submit => {
            if state.phase != AppPhase::Search {
                return Ok((false, vec![]));
            }

            let request = match state.search_method {
                SearchMethod::Address => {
                    // A point adopted from a selected suggestion beats the
                    // free-text address; without one, the backend geocodes
                    // the text itself.
                    if let Some(point) = state.selected_point {
                        LocationRequest::for_point(point)
                    } else if state.address.trim().is_empty() {
                        LocationRequest::default()
                    } else {
                        LocationRequest::for_address(state.address.trim())
                    }
                }
                SearchMethod::Coordinates | SearchMethod::Map => state
                    .selected_point
                    .map(LocationRequest::for_point)
                    .unwrap_or_default(),
            };

            if request.is_empty() {
                tracing::debug!("submit with nothing to search, ignoring");
                return Ok((false, vec![]));
            }

            tracing::debug!(
                method = ?state.search_method,
                has_coordinates = request.coordinates.is_some(),
                "location search submitted"
            );

            state.phase = AppPhase::Loading;
            state.error = None;
            state.current_query = None;
            state.clear_suggestions();
            state.coalescer.cancel_pending();

            Ok((
                true,
                vec![
                    Action::CancelSuggestionTimer,
                    Action::PostToWorker(WorkerMessage::FetchLocation { request }),
                ],
            ))
        }

        Event::Reset => {
            state.reset_search();
            Ok((true, vec![Action::CancelSuggestionTimer]))
        }

        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Processes a worker response.
///
/// Suggestion responses go through the staleness check and soft-fail on
/// error; location responses resolve the loading phase.
fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::SuggestionsLoaded { query, suggestions } => {
            if state.current_query.as_deref() != Some(query.as_str()) {
                tracing::debug!(
                    query = %query,
                    current = ?state.current_query,
                    "discarding suggestions for superseded query"
                );
                return Ok((false, vec![]));
            }

            state.publish_suggestions(suggestions.clone());
            Ok((true, vec![]))
        }

        WorkerResponse::SuggestionsFailed { query, message } => {
            tracing::debug!(query = %query, error = %message, "suggestion fetch failed");

            if state.current_query.as_deref() != Some(query.as_str()) {
                return Ok((false, vec![]));
            }

            // Fail soft: empty list, hidden panel, no user-facing error.
            state.clear_suggestions();
            Ok((true, vec![]))
        }

        WorkerResponse::LocationLoaded { report } => {
            if state.phase != AppPhase::Loading {
                tracing::debug!("location report arrived outside loading phase, ignoring");
                return Ok((false, vec![]));
            }

            state.report = Some(report.clone());
            state.phase = AppPhase::Results;
            Ok((true, vec![]))
        }

        WorkerResponse::LocationFailed { message } => {
            if state.phase != AppPhase::Loading {
                return Ok((false, vec![]));
            }

            tracing::debug!(error = %message, "location search failed");
            state.error = Some(message.clone());
            state.phase = AppPhase::Search;
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::coalescer::SuggestionCoalescer;
    use crate::app::state::DEFAULT_MAX_SUGGESTIONS;
    use crate::backend::LocationReport;
    use crate::domain::{GeoPoint, Suggestion, SuggestionKind};
    use std::cell::Cell;
    use std::rc::Rc;

    struct ManualClock(Rc<Cell<i64>>);

    impl crate::app::coalescer::Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.0.get()
        }
    }

    fn state_at(start_ms: i64) -> (AppState, Rc<Cell<i64>>) {
        let time = Rc::new(Cell::new(start_ms));
        let clock = ManualClock(Rc::clone(&time));
        let coalescer = SuggestionCoalescer::with_clock(Box::new(clock));
        (AppState::new(coalescer, DEFAULT_MAX_SUGGESTIONS), time)
    }

    fn suggestion(id: usize, address: &str, point: Option<GeoPoint>) -> Suggestion {
        Suggestion {
            id,
            kind: SuggestionKind::Street,
            full_address: address.to_string(),
            coordinates: point,
        }
    }

    fn report() -> LocationReport {
        LocationReport {
            stats: serde_json::json!({"population": 170000}),
            resume: None,
            formatted_output: "Le Havre".to_string(),
            filename: "out.txt".to_string(),
        }
    }

    fn dispatched_queries(actions: &[Action]) -> Vec<String> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(WorkerMessage::FetchSuggestions { query }) => {
                    Some(query.clone())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn long_input_dispatches_a_fetch() {
        let (mut state, _time) = state_at(0);

        let (_, actions) =
            handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        assert_eq!(dispatched_queries(&actions), vec!["Paris"]);
        assert_eq!(state.current_query.as_deref(), Some("Paris"));
    }

    #[test]
    fn short_input_clears_and_cancels() {
        let (mut state, _time) = state_at(0);
        state.suggestions = vec![suggestion(0, "old", None)];
        state.show_suggestions = true;

        let (render, actions) =
            handle_event(&mut state, &Event::InputChanged("Par".to_string())).unwrap();
        assert!(render);
        assert!(actions.contains(&Action::CancelSuggestionTimer));
        assert!(state.suggestions.is_empty());
        assert!(!state.show_suggestions);
        assert_eq!(state.current_query, None);
    }

    #[test]
    fn rapid_inputs_dispatch_only_the_latest() {
        let (mut state, time) = state_at(0);

        let (_, a0) = handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        assert_eq!(dispatched_queries(&a0), vec!["Paris"]);

        time.set(60);
        let (_, a1) =
            handle_event(&mut state, &Event::InputChanged("Paris 7".to_string())).unwrap();
        assert!(matches!(a1[0], Action::ArmSuggestionTimer { .. }));

        time.set(140);
        let (_, a2) =
            handle_event(&mut state, &Event::InputChanged("Paris 7e".to_string())).unwrap();
        assert!(matches!(
            a2[0],
            Action::ArmSuggestionTimer { ref query, .. } if query == "Paris 7e"
        ));

        // The replaced timer fires anyway; it must dispatch nothing.
        time.set(200);
        let (_, stale) = handle_event(
            &mut state,
            &Event::SuggestionTimer {
                query: "Paris 7".to_string(),
            },
        )
        .unwrap();
        assert!(dispatched_queries(&stale).is_empty());

        let (_, live) = handle_event(
            &mut state,
            &Event::SuggestionTimer {
                query: "Paris 7e".to_string(),
            },
        )
        .unwrap();
        assert_eq!(dispatched_queries(&live), vec!["Paris 7e"]);
    }

    #[test]
    fn stale_suggestion_response_is_discarded() {
        let (mut state, time) = state_at(0);

        handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        time.set(250);
        handle_event(&mut state, &Event::InputChanged("Le Havre".to_string())).unwrap();

        // The response for the superseded query arrives late.
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SuggestionsLoaded {
                query: "Paris".to_string(),
                suggestions: vec![suggestion(0, "Paris", None)],
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(state.suggestions.is_empty());

        // The current one publishes.
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SuggestionsLoaded {
                query: "Le Havre".to_string(),
                suggestions: vec![suggestion(0, "Le Havre", None)],
            }),
        )
        .unwrap();
        assert!(render);
        assert_eq!(state.suggestions.len(), 1);
        assert!(state.show_suggestions);
    }

    #[test]
    fn failed_fetch_soft_fails_to_empty_panel() {
        let (mut state, _time) = state_at(0);

        handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        state.suggestions = vec![suggestion(0, "old", None)];
        state.show_suggestions = true;

        let result = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SuggestionsFailed {
                query: "Paris".to_string(),
                message: "connection refused".to_string(),
            }),
        );

        // No exception escapes; list empty, panel hidden.
        let (render, actions) = result.unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.suggestions.is_empty());
        assert!(!state.show_suggestions);
        assert_eq!(state.error, None);
    }

    #[test]
    fn publication_bounds_the_list() {
        let (mut state, _time) = state_at(0);
        handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();

        let many: Vec<Suggestion> = (0..25).map(|i| suggestion(i, "Paris", None)).collect();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SuggestionsLoaded {
                query: "Paris".to_string(),
                suggestions: many,
            }),
        )
        .unwrap();

        assert_eq!(state.suggestions.len(), DEFAULT_MAX_SUGGESTIONS);
    }

    #[test]
    fn selection_commits_address_and_point() {
        let (mut state, _time) = state_at(0);
        handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SuggestionsLoaded {
                query: "Paris".to_string(),
                suggestions: vec![suggestion(
                    0,
                    "15 Avenue des Champs-Élysées, 75008 Paris",
                    Some(GeoPoint::new(48.85, 2.35)),
                )],
            }),
        )
        .unwrap();

        let (render, actions) = handle_event(&mut state, &Event::SuggestionSelected(0)).unwrap();
        assert!(render);
        assert!(actions.contains(&Action::CancelSuggestionTimer));
        assert_eq!(state.address, "15 Avenue des Champs-Élysées, 75008 Paris");
        assert_eq!(state.selected_point, Some(GeoPoint::new(48.85, 2.35)));
        assert!(state.suggestions.is_empty());
        assert!(!state.show_suggestions);
    }

    #[test]
    fn selection_wins_over_armed_timer() {
        let (mut state, time) = state_at(0);

        handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SuggestionsLoaded {
                query: "Paris".to_string(),
                suggestions: vec![suggestion(0, "Paris", Some(GeoPoint::new(48.85, 2.35)))],
            }),
        )
        .unwrap();

        // Another keystroke defers a query, then the user selects before the
        // timer fires.
        time.set(100);
        handle_event(&mut state, &Event::InputChanged("Paris 7".to_string())).unwrap();
        handle_event(&mut state, &Event::SuggestionSelected(0)).unwrap();

        time.set(200);
        let (_, actions) = handle_event(
            &mut state,
            &Event::SuggestionTimer {
                query: "Paris 7".to_string(),
            },
        )
        .unwrap();
        assert!(dispatched_queries(&actions).is_empty());
        // The committed text stays what was selected.
        assert_eq!(state.address, "Paris");
    }

    #[test]
    fn dismiss_hides_panel_without_clearing_text() {
        let (mut state, _time) = state_at(0);
        state.address = "Paris".to_string();
        state.suggestions = vec![suggestion(0, "Paris", None)];
        state.show_suggestions = true;

        let (render, _) = handle_event(&mut state, &Event::DismissSuggestions).unwrap();
        assert!(render);
        assert!(!state.show_suggestions);
        assert_eq!(state.address, "Paris");

        // Dismissing an already-hidden panel is a no-op.
        let (render, _) = handle_event(&mut state, &Event::DismissSuggestions).unwrap();
        assert!(!render);
    }

    #[test]
    fn typing_over_a_selection_drops_its_point() {
        let (mut state, _time) = state_at(0);
        state.address = "Paris".to_string();
        state.selected_point = Some(GeoPoint::new(48.85, 2.35));

        handle_event(&mut state, &Event::InputChanged("Paris 8".to_string())).unwrap();
        assert_eq!(state.selected_point, None);
    }

    #[test]
    fn submit_by_address_uses_point_when_present() {
        let (mut state, _time) = state_at(0);
        state.address = "Paris".to_string();
        state.selected_point = Some(GeoPoint::new(48.85, 2.35));

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let request = actions.iter().find_map(|a| match a {
            Action::PostToWorker(WorkerMessage::FetchLocation { request }) => Some(request.clone()),
            _ => None,
        });
        let request = request.unwrap();
        assert_eq!(request.coordinates, Some(GeoPoint::new(48.85, 2.35)));
        assert_eq!(request.address, None);
        assert_eq!(state.phase, AppPhase::Loading);
    }

    #[test]
    fn submit_with_nothing_to_search_is_a_no_op() {
        let (mut state, _time) = state_at(0);

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.phase, AppPhase::Search);

        state.search_method = SearchMethod::Coordinates;
        let (render, _) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!render);
    }

    #[test]
    fn location_search_resolves_to_results() {
        let (mut state, _time) = state_at(0);
        state.address = "Le Havre".to_string();

        handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.phase, AppPhase::Loading);

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LocationLoaded { report: report() }),
        )
        .unwrap();
        assert_eq!(state.phase, AppPhase::Results);
        assert!(state.report.is_some());
        assert_eq!(state.error, None);
    }

    #[test]
    fn location_failure_reverts_to_search_with_error() {
        let (mut state, _time) = state_at(0);
        state.address = "Le Havre".to_string();

        handle_event(&mut state, &Event::Submit).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LocationFailed {
                message: "City \"Nowhere\" not found in database".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(state.phase, AppPhase::Search);
        assert_eq!(
            state.error.as_deref(),
            Some("City \"Nowhere\" not found in database")
        );
    }

    #[test]
    fn method_change_resets_transient_state() {
        let (mut state, _time) = state_at(0);
        state.address = "Paris".to_string();
        state.selected_point = Some(GeoPoint::new(48.85, 2.35));
        state.suggestions = vec![suggestion(0, "Paris", None)];
        state.show_suggestions = true;

        let (render, actions) =
            handle_event(&mut state, &Event::MethodChanged(SearchMethod::Map)).unwrap();
        assert!(render);
        assert!(actions.contains(&Action::CancelSuggestionTimer));
        assert_eq!(state.search_method, SearchMethod::Map);
        assert!(state.address.is_empty());
        assert_eq!(state.selected_point, None);
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn coordinate_entry_parses_or_ignores() {
        let (mut state, _time) = state_at(0);

        handle_event(
            &mut state,
            &Event::CoordinatesEntered {
                lat: "49.49".to_string(),
                lon: "0.10".to_string(),
            },
        )
        .unwrap();
        assert_eq!(state.selected_point, Some(GeoPoint::new(49.49, 0.10)));

        // Garbage input leaves the point untouched.
        handle_event(
            &mut state,
            &Event::CoordinatesEntered {
                lat: "north".to_string(),
                lon: "0.10".to_string(),
            },
        )
        .unwrap();
        assert_eq!(state.selected_point, Some(GeoPoint::new(49.49, 0.10)));
    }

    #[test]
    fn reset_returns_to_pristine_search() {
        let (mut state, _time) = state_at(0);
        state.address = "Le Havre".to_string();
        handle_event(&mut state, &Event::Submit).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::LocationLoaded { report: report() }),
        )
        .unwrap();

        handle_event(&mut state, &Event::Reset).unwrap();
        assert_eq!(state.phase, AppPhase::Search);
        assert_eq!(state.search_method, SearchMethod::Address);
        assert!(state.address.is_empty());
        assert!(state.report.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn teardown_silences_timers_through_state() {
        let (mut state, time) = state_at(0);

        handle_event(&mut state, &Event::InputChanged("Paris".to_string())).unwrap();
        time.set(100);
        handle_event(&mut state, &Event::InputChanged("Paris 7".to_string())).unwrap();

        state.teardown();

        time.set(200);
        let (_, actions) = handle_event(
            &mut state,
            &Event::SuggestionTimer {
                query: "Paris 7".to_string(),
            },
        )
        .unwrap();
        assert!(dispatched_queries(&actions).is_empty());
    }
}
