//! Interactive runtime shim and entry point.
//!
//! This module provides the thin integration layer between the locus library
//! and a terminal: a channel-based event loop, the single replaceable
//! suggestion timer, and the background worker thread that performs all
//! network I/O.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │   Main Thread (event loop)   │
//! │  ┌────────────────────────┐  │
//! │  │  AppState + handler    │  │  ← state machine, coalescing
//! │  └────────────────────────┘  │
//! │     ▲          │ actions     │
//! │     │ events   ▼             │
//! │  ┌──────┐  ┌─────────────┐   │
//! │  │stdin │  │ timer thread│   │  ← generation-tagged, replace-then-arm
//! │  └──────┘  └─────────────┘   │
//! │     ▲          │             │
//! │     │   ┌─────────────┐      │
//! │     └───│ SearchWorker│      │  ← HTTP to geocoder + backend
//! │         └─────────────┘      │
//! └──────────────────────────────┘
//! ```
//!
//! # Input Mapping
//!
//! The shim is line-oriented: each plain line replaces the content of the
//! (virtual) search input box and flows through the coalescer like a text
//! change event. Colon commands drive the rest of the flow:
//!
//! - `:select N` - pick suggestion `N` from the last published list
//! - `:method address|coords|map` - switch the search method
//! - `:point LAT LON` - enter coordinates manually
//! - `:click LAT LON` - simulate a map click
//! - `:hide` - dismiss the suggestion panel
//! - `:go` - submit the search
//! - `:reset` - return to a fresh search
//! - `:quit` - exit
//!
//! # Timer Contract
//!
//! The suggestion timer is replace-then-arm: arming bumps a generation
//! counter captured by the sleeping thread, and a fire is delivered only if
//! the generation is still current. At most one timer is ever live, and a
//! cancelled timer fires into nothing; the coalescer's staleness check
//! would ignore it anyway.

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use locus::app::{handle_event, Action, AppPhase, AppState, Event, SearchMethod};
use locus::worker::{SearchWorker, WorkerMessage, WorkerResponse};
use locus::Config;

/// Location-search demo: throttled address autocompletion plus backend
/// statistics lookup.
#[derive(Debug, Parser)]
#[command(name = "locus", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, env = "LOCUS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the geocoding completion service base URL.
    #[arg(long)]
    geocoder_url: Option<String>,

    /// Override the statistics backend base URL.
    #[arg(long)]
    backend_url: Option<String>,

    /// Tracing level (trace, debug, info, warn, error).
    #[arg(long)]
    trace_level: Option<String>,
}

impl Cli {
    /// Resolves the effective configuration: file first, then flag overrides.
    fn into_config(self) -> locus::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(url) = self.geocoder_url {
            config.geocoder_url = url;
        }
        if let Some(url) = self.backend_url {
            config.backend_url = url;
        }
        if let Some(level) = self.trace_level {
            config.trace_level = Some(level);
        }

        Ok(config)
    }
}

/// Everything the event loop can receive.
#[derive(Debug)]
enum RuntimeEvent {
    /// An application event to feed through the handler.
    App(Event),

    /// Terminate the loop.
    Quit,
}

/// Parses one stdin line into a runtime event.
///
/// Plain text becomes an input change; colon commands map to flow events.
/// Unknown commands are `None` (reported, not fatal).
fn parse_line(line: &str) -> Option<RuntimeEvent> {
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');

    let Some(command) = line.strip_prefix(':') else {
        return Some(RuntimeEvent::App(Event::InputChanged(line.to_string())));
    };

    let mut parts = command.split_whitespace();
    match parts.next()? {
        "quit" | "q" => Some(RuntimeEvent::Quit),
        "go" | "search" => Some(RuntimeEvent::App(Event::Submit)),
        "reset" => Some(RuntimeEvent::App(Event::Reset)),
        "select" | "s" => {
            let index = parts.next()?.parse::<usize>().ok()?;
            Some(RuntimeEvent::App(Event::SuggestionSelected(index)))
        }
        "method" | "m" => {
            let method = match parts.next()? {
                "address" => SearchMethod::Address,
                "coords" | "coordinates" => SearchMethod::Coordinates,
                "map" => SearchMethod::Map,
                _ => return None,
            };
            Some(RuntimeEvent::App(Event::MethodChanged(method)))
        }
        "point" | "p" => {
            let lat = parts.next()?.to_string();
            let lon = parts.next()?.to_string();
            Some(RuntimeEvent::App(Event::CoordinatesEntered { lat, lon }))
        }
        "click" | "c" => {
            let lat = parts.next()?.parse::<f64>().ok()?;
            let lon = parts.next()?.parse::<f64>().ok()?;
            Some(RuntimeEvent::App(Event::MapClicked { lat, lon }))
        }
        "hide" => Some(RuntimeEvent::App(Event::DismissSuggestions)),
        _ => None,
    }
}

/// Runtime state wrapper.
///
/// Wraps the library's `AppState` with runtime concerns: the event channel,
/// the worker channel and the timer generation counter.
struct Runtime {
    app: AppState,
    event_tx: mpsc::Sender<RuntimeEvent>,
    worker_tx: mpsc::Sender<WorkerMessage>,
    timer_generation: Arc<AtomicU64>,
}

impl Runtime {
    /// Arms the suggestion timer, replacing any timer armed earlier.
    fn arm_timer(&self, query: String, delay_ms: i64) {
        let generation = self.timer_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let counter = Arc::clone(&self.timer_generation);
        let tx = self.event_tx.clone();

        let delay = Duration::from_millis(delay_ms.max(0) as u64);

        thread::spawn(move || {
            thread::sleep(delay);
            if counter.load(Ordering::SeqCst) == generation {
                let _ = tx.send(RuntimeEvent::App(Event::SuggestionTimer { query }));
            }
        });
    }

    /// Cancels the suggestion timer by invalidating its generation.
    fn cancel_timer(&self) {
        self.timer_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Executes an action returned from event handling.
    fn execute_action(&self, action: Action) {
        match action {
            Action::ArmSuggestionTimer { query, delay_ms } => {
                tracing::debug!(query = %query, delay_ms, "arming suggestion timer");
                self.arm_timer(query, delay_ms);
            }
            Action::CancelSuggestionTimer => {
                self.cancel_timer();
            }
            Action::PostToWorker(message) => {
                tracing::debug!(message = ?message, "posting message to worker");
                if self.worker_tx.send(message).is_err() {
                    tracing::warn!("worker channel closed, dropping message");
                }
            }
        }
    }

    /// Prints the current state of the search flow.
    fn render(&self) {
        match self.app.phase {
            AppPhase::Search => {
                if let Some(error) = &self.app.error {
                    println!("error: {error}");
                }
                if self.app.show_suggestions {
                    println!("suggestions:");
                    for suggestion in &self.app.suggestions {
                        let mark = match suggestion.coordinates {
                            Some(point) => format!(" ({:.4}, {:.4})", point.lat, point.lon),
                            None => String::new(),
                        };
                        println!("  [{}] {}{mark}", suggestion.id, suggestion.full_address);
                    }
                    println!("(`:select N` to pick one, `:go` to search)");
                } else if let Some(point) = self.app.selected_point {
                    println!("point: {:.4}, {:.4}  (`:go` to search)", point.lat, point.lon);
                }
            }
            AppPhase::Loading => {
                println!("searching...");
            }
            AppPhase::Results => {
                if let Some(report) = &self.app.report {
                    println!("{}", report.formatted_output);
                    if let Some(resume) = &report.resume {
                        println!("\n{resume}");
                    }
                }
                println!("(`:reset` for a new search)");
            }
        }
    }
}

/// Spawns the worker thread owning the HTTP clients.
fn spawn_worker(
    config: Config,
    event_tx: mpsc::Sender<RuntimeEvent>,
) -> mpsc::Sender<WorkerMessage> {
    let (worker_tx, worker_rx) = mpsc::channel::<WorkerMessage>();

    thread::spawn(move || {
        let mut worker = SearchWorker::new(config);
        while let Ok(message) = worker_rx.recv() {
            let response: WorkerResponse = worker.handle_message(message);
            if event_tx
                .send(RuntimeEvent::App(Event::WorkerResponse(response)))
                .is_err()
            {
                break;
            }
        }
    });

    worker_tx
}

/// Spawns the stdin reader thread.
fn spawn_stdin(event_tx: mpsc::Sender<RuntimeEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line) {
                Some(event) => {
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                None => eprintln!("unrecognized command: {line}"),
            }
        }
        // EOF behaves like :quit.
        let _ = event_tx.send(RuntimeEvent::Quit);
    });
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("locus: {e}");
            return ExitCode::FAILURE;
        }
    };

    locus::observability::init_tracing(&config);

    let (event_tx, event_rx) = mpsc::channel::<RuntimeEvent>();
    let worker_tx = spawn_worker(config.clone(), event_tx.clone());
    spawn_stdin(event_tx.clone());

    let mut runtime = Runtime {
        app: locus::initialize(&config),
        event_tx,
        worker_tx,
        timer_generation: Arc::new(AtomicU64::new(0)),
    };

    println!("locus: type an address (5+ characters) for suggestions; `:quit` to exit");

    while let Ok(runtime_event) = event_rx.recv() {
        let event = match runtime_event {
            RuntimeEvent::App(event) => event,
            RuntimeEvent::Quit => break,
        };

        match handle_event(&mut runtime.app, &event) {
            Ok((rerender, actions)) => {
                for action in actions {
                    runtime.execute_action(action);
                }
                if rerender {
                    runtime.render();
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
            }
        }
    }

    runtime.app.teardown();
    runtime.cancel_timer();

    ExitCode::SUCCESS
}
