//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! runtime (main.rs) and the domain/worker layers. It implements the
//! event-driven architecture that powers the interactive search flow.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └── Timer fires / Worker Responses ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`coalescer`]: The throttle/coalesce policy for suggestion lookups
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Search method and application phase types
//! - [`state`]: Central application state container

pub mod actions;
pub mod coalescer;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use coalescer::{Clock, InputDirective, SuggestionCoalescer, SystemClock, THROTTLE_WINDOW_MS};
pub use handler::{handle_event, Event};
pub use modes::{AppPhase, SearchMethod};
pub use state::AppState;
