use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default name of the launch grid file used by auto-discovery.
pub const DEFAULT_GRID_FILE: &str = "shoe-launch-grid-by-month.csv";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.launch-calendar/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.launch-calendar/`
/// - `~/.launch-calendar/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let calendar_dir = home.join(".launch-calendar");
    std::fs::create_dir_all(&calendar_dir)?;
    std::fs::create_dir_all(calendar_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Grid-file discovery ────────────────────────────────────────────────────────

/// Attempt to locate the launch grid file on the local system.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./shoe-launch-grid-by-month.csv` (current working directory)
/// 2. `~/.launch-calendar/shoe-launch-grid-by-month.csv`
///
/// Returns `None` when neither path exists.
pub fn discover_grid_file() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_GRID_FILE)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".launch-calendar").join(DEFAULT_GRID_FILE));
    }
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
