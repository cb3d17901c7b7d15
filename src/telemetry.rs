//! Optional span tracing for the bootstrap steps (cargo feature `trace`).
//!
//! Spans go to stderr so the timestamped stdout log stays untouched.
//! Enabled when `SETUP_APP_TRACE=1` or `RUST_LOG` is set.

#[cfg(feature = "trace")]
use once_cell::sync::OnceCell;

#[cfg(feature = "trace")]
static INIT: OnceCell<()> = OnceCell::new();

#[cfg(feature = "trace")]
fn tracing_enabled_env() -> bool {
    let flag = std::env::var("SETUP_APP_TRACE").ok().as_deref() == Some("1");
    let rust_log = std::env::var("RUST_LOG")
        .ok()
        .map(|s| !s.trim().is_empty())
        .unwrap_or(false);
    flag || rust_log
}

/// Install the stderr fmt subscriber once. Returns whether tracing is active.
#[cfg(feature = "trace")]
pub fn telemetry_init() -> bool {
    use tracing_subscriber::prelude::*;

    if INIT.get().is_some() {
        return true;
    }
    if !tracing_enabled_env() {
        return false;
    }

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    if registry.try_init().is_err() {
        eprintln!("setup-app: tracing init skipped (global subscriber already set)");
        return false;
    }
    let _ = INIT.set(());
    true
}

#[cfg(not(feature = "trace"))]
pub fn telemetry_init() -> bool {
    false
}
