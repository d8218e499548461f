//! # Cantina Manager Library
//!
//! Core library for the Cantina menu manager application.
//!
//! ## Module Organization
//! ```text
//! cantina_manager/
//! ├── lib.rs          ◄─── You are here (bootstrap & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── form.rs     ◄─── Form session (fields, result set, cursor)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── menu_item.rs◄─── CRUD / search / navigation commands
//! │   └── report.rs   ◄─── Report preview command
//! ├── console.rs      ◄─── Console front end driving the commands
//! ├── config.rs       ◄─── JSON config + path resolution
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Resolve Paths ────────────────────────────────────────────────────► │
//! │     • --config JSON file, then platform data directory defaults         │
//! │     • Linux: ~/.local/share/cantina/cantina.db                          │
//! │                                                                         │
//! │  3. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, foreign keys ON                             │
//! │     • Run pending migrations (seeds the six categories)                 │
//! │                                                                         │
//! │  4. Initialize State ─────────────────────────────────────────────────► │
//! │     • FormState: empty form session                                     │
//! │     • refresh: load categories + items, show the first record           │
//! │                                                                         │
//! │  5. Run the Front End ────────────────────────────────────────────────► │
//! │     • Console loop over the command surface                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod state;

use std::path::PathBuf;

use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cantina_db::{Database, DbConfig};
use config::AppConfig;
use error::ApiError;
use state::FormState;

/// Options resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Path to a JSON config file.
    pub config: Option<PathBuf>,
    /// Database path override (wins over the config file).
    pub database: Option<PathBuf>,
    /// Reports directory override (wins over the config file).
    pub reports_dir: Option<PathBuf>,
}

/// Runs the menu manager.
pub fn run(runtime: &Runtime, options: RunOptions) -> Result<(), ApiError> {
    init_tracing();

    info!("Starting Cantina menu manager");

    // Resolve configuration: file, then overrides, then data-dir defaults
    let mut app_config = match &options.config {
        Some(path) => AppConfig::load(path)
            .map_err(|e| ApiError::internal(e.to_string()))?,
        None => AppConfig::default(),
    };
    if options.database.is_some() {
        app_config.database_path = options.database.clone();
    }
    if options.reports_dir.is_some() {
        app_config.reports_dir = options.reports_dir.clone();
    }

    let database_path = app_config.resolve_database_path();
    let reports_dir = app_config.resolve_reports_dir();

    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| ApiError::internal(format!("cannot create data directory: {e}")))?;
    }
    info!(?database_path, ?reports_dir, "Paths resolved");

    // Connect and migrate
    let db = runtime.block_on(Database::new(DbConfig::new(&database_path)))?;
    info!("Database connected and migrations applied");

    // Initial load: categories into the selector, items into the result set
    let form = FormState::new();
    runtime.block_on(commands::menu_item::refresh(&db, &form))?;
    info!("State initialized");

    console::run(runtime, &db, &form, &reports_dir)?;

    runtime.block_on(db.close());
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cantina=trace` - Show trace for cantina crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cantina=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
