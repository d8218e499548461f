//! # Application Configuration
//!
//! Configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--database`, `--reports-dir`)
//! 2. JSON config file (`--config path/to/config.json`)
//! 3. Platform data directory defaults (this file)
//!
//! The config file is small on purpose — the store is a local SQLite file,
//! so "connection parameters" collapse into a path:
//!
//! ```json
//! {
//!   "databasePath": "/var/lib/cantina/cantina.db",
//!   "reportsDir": "/var/lib/cantina/reports"
//! }
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Application configuration.
///
/// Every field is optional; resolution falls back to the platform data
/// directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Path of the SQLite database file.
    pub database_path: Option<PathBuf>,

    /// Directory rendered reports are written into.
    pub reports_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads the configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolves the database path, falling back to the platform data dir
    /// (e.g. `~/.local/share/cantina/cantina.db` on Linux) and finally to
    /// the working directory.
    pub fn resolve_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        match ProjectDirs::from("com", "cantina", "cantina") {
            Some(dirs) => dirs.data_dir().join("cantina.db"),
            None => PathBuf::from("cantina.db"),
        }
    }

    /// Resolves the reports directory, next to the database by default.
    pub fn resolve_reports_dir(&self) -> PathBuf {
        if let Some(dir) = &self.reports_dir {
            return dir.clone();
        }

        match ProjectDirs::from("com", "cantina", "cantina") {
            Some(dirs) => dirs.data_dir().join("reports"),
            None => PathBuf::from("reports"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let raw = r#"{ "databasePath": "/tmp/menu.db", "reportsDir": "/tmp/reports" }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();

        assert_eq!(config.resolve_database_path(), PathBuf::from("/tmp/menu.db"));
        assert_eq!(config.resolve_reports_dir(), PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_data_dir() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();

        let db = config.resolve_database_path();
        assert!(db.ends_with("cantina.db"));

        let reports = config.resolve_reports_dir();
        assert!(reports.ends_with("reports"));
    }
}
