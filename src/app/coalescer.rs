//! The suggestion-search coalescer.
//!
//! This module implements the throttling/coalescing policy that sits between
//! the text-input event stream and the geocoding completion service. It
//! converts a rapid stream of text-change events into a rate-limited,
//! superseding sequence of lookups, guaranteeing that:
//!
//! - no two dispatches happen less than [`THROTTLE_WINDOW_MS`] apart, except
//!   the very first;
//! - at most one "next query to run" is pending at any time, and newer input
//!   overwrites it rather than queueing behind it;
//! - only the most recent query is ever eventually dispatched, never an
//!   intermediate one;
//! - a timer armed for a query that has since been superseded, cleared or
//!   torn down fires into nothing.
//!
//! # Ownership
//!
//! All throttle state (last dispatch time, pending marker) lives in fields of
//! a [`SuggestionCoalescer`] instance rather than module-level globals, and
//! the clock is injected via the [`Clock`] trait so the policy is fully
//! deterministic under test.
//!
//! # Timer contract
//!
//! The coalescer does not own a real timer. It emits [`InputDirective`]
//! values; the runtime owning the single timer handle must treat
//! [`InputDirective::ArmTimer`] as replace-then-arm (cancelling any previous
//! timer) and [`InputDirective::Clear`] as a cancellation. Even if a replaced
//! timer does fire, [`SuggestionCoalescer::on_timer_fired`] only dispatches
//! when the fired query still equals the pending marker, so stale fires are
//! harmless.

use crate::domain::query;

/// Minimum spacing between dispatched completion lookups, in milliseconds.
///
/// Fixed configuration of the coalescer, not adjustable at call time.
pub const THROTTLE_WINDOW_MS: i64 = 200;

/// A monotonic-enough source of the current time in milliseconds.
///
/// The coalescer only ever subtracts two readings taken on the same clock,
/// so the epoch does not matter. Production uses [`SystemClock`]; tests
/// inject a manually-advanced clock.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock [`Clock`] implementation.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// What the runtime must do after an input change.
///
/// Produced by [`SuggestionCoalescer::on_input_changed`]. Exactly one
/// directive is returned per input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDirective {
    /// Dispatch a completion lookup for `query` immediately.
    Dispatch {
        /// Sanitized query to look up.
        query: String,
    },

    /// Arm the single suggestion timer for `delay_ms`, replacing any timer
    /// armed earlier. When it fires, feed the query back through
    /// [`SuggestionCoalescer::on_timer_fired`].
    ArmTimer {
        /// Sanitized query recorded as pending.
        query: String,
        /// Remaining time until the throttle window reopens.
        delay_ms: i64,
    },

    /// The input is too short to search: clear the suggestion list, hide the
    /// panel and cancel any armed timer. Not an error.
    Clear,
}

/// State machine enforcing the throttle/coalesce policy.
///
/// One instance per search input. All mutation happens synchronously inside
/// event callbacks; the runtime is single-threaded and cooperative, so no
/// locking is involved.
pub struct SuggestionCoalescer {
    /// Injected time source.
    clock: Box<dyn Clock>,

    /// Timestamp of the last dispatched lookup, `None` before the first.
    ///
    /// `None` makes the first schedule dispatch immediately regardless of
    /// the clock's epoch.
    last_dispatch_ms: Option<i64>,

    /// The at-most-one outstanding "next query to run".
    ///
    /// Overwritten by newer input, cleared by dispatch, short input,
    /// selection and teardown.
    pending: Option<String>,
}

impl std::fmt::Debug for SuggestionCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionCoalescer")
            .field("last_dispatch_ms", &self.last_dispatch_ms)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Default for SuggestionCoalescer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionCoalescer {
    /// Creates a coalescer backed by the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Creates a coalescer with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last_dispatch_ms: None,
            pending: None,
        }
    }

    /// Processes a raw text-change event.
    ///
    /// Sanitizes the input (stripping characters outside letters, digits and
    /// whitespace). Input below the minimum threshold clears all pending
    /// state and produces [`InputDirective::Clear`] without touching the
    /// network; anything else goes through the scheduling policy.
    pub fn on_input_changed(&mut self, raw: &str) -> InputDirective {
        let sanitized = query::sanitize(raw);

        if !query::is_searchable(&sanitized) {
            tracing::trace!(len = sanitized.chars().count(), "query below threshold");
            self.pending = None;
            return InputDirective::Clear;
        }

        self.schedule(sanitized)
    }

    /// The coalescing policy.
    ///
    /// If at least a full throttle window has passed since the last dispatch
    /// (or nothing was ever dispatched), the query goes out immediately and
    /// the dispatch timestamp is recorded. Otherwise the query becomes the
    /// pending request (overwriting any previous one) and the single timer
    /// is (re)armed for the remainder of the window.
    fn schedule(&mut self, query: String) -> InputDirective {
        let now = self.clock.now_ms();

        if let Some(last) = self.last_dispatch_ms {
            let elapsed = now - last;
            if elapsed < THROTTLE_WINDOW_MS {
                let delay_ms = THROTTLE_WINDOW_MS - elapsed;
                tracing::debug!(query = %query, delay_ms, "queueing query behind throttle window");
                self.pending = Some(query.clone());
                return InputDirective::ArmTimer { query, delay_ms };
            }
        }

        tracing::debug!(query = %query, "dispatching query immediately");
        self.pending = None;
        self.last_dispatch_ms = Some(now);
        InputDirective::Dispatch { query }
    }

    /// Handles the suggestion timer firing for `query`.
    ///
    /// Dispatches only if the recorded pending request still equals the
    /// query the timer was armed with; a newer keystroke, a selection, a
    /// too-short input or a teardown in the meantime all make the fire a
    /// no-op. The dispatch timestamp is stamped at actual fire time.
    pub fn on_timer_fired(&mut self, fired_query: &str) -> Option<String> {
        if self.pending.as_deref() != Some(fired_query) {
            tracing::debug!(
                fired_query = %fired_query,
                pending = ?self.pending,
                "timer fired for superseded query, ignoring"
            );
            return None;
        }

        tracing::debug!(query = %fired_query, "timer fired, dispatching pending query");
        self.pending = None;
        self.last_dispatch_ms = Some(self.clock.now_ms());
        Some(fired_query.to_string())
    }

    /// Drops the pending marker so any armed timer fires into nothing.
    ///
    /// Called when a suggestion is selected (selection wins over in-flight
    /// timers) and when transient search state is reset.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("pending suggestion query cancelled");
        }
    }

    /// Scoped cleanup for component disposal.
    ///
    /// Cancels the pending marker; the owning runtime must also drop its
    /// timer handle. After teardown a previously armed timer never
    /// dispatches.
    pub fn teardown(&mut self) {
        tracing::debug!("coalescer teardown");
        self.cancel_pending();
    }

    /// Returns whether a deferred query is waiting on the timer.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
