//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber used by the whole process:
//! an `EnvFilter` with the configured level and a compact fmt layer writing
//! to stderr, where it never interferes with the interactive stdout surface.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the configured trace level.
const LOG_ENV: &str = "LOCUS_LOG";

/// Initializes the tracing subscriber.
///
/// # Trace Level Resolution
///
/// 1. The `LOCUS_LOG` environment variable, if set (full `EnvFilter` syntax)
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Idempotent: safe to call multiple times, only the first call takes
///   effect
/// - Silently does nothing if a subscriber is already installed
///   (observability is optional)
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}
