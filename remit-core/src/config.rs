//! Configuration management
//!
//! Settings live in `settings.json` inside the remit directory:
//! ```json
//! {
//!   "database": "remit.duckdb",
//!   "faultInjection": { "sentinelId": "ex" }
//! }
//! ```
//! Unknown keys are preserved when the file is saved back.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_DATABASE: &str = "remit.duckdb";

/// Environment variable overriding the database file name
pub const ENV_DATABASE: &str = "REMIT_DATABASE";
/// Environment variable overriding the fault-injection sentinel (empty disables)
pub const ENV_FAULT_SENTINEL: &str = "REMIT_FAULT_SENTINEL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    database: Option<String>,
    #[serde(default)]
    fault_injection: FaultInjectionSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FaultInjectionSettings {
    #[serde(default)]
    sentinel_id: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Remit configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database file name, relative to the remit directory
    pub database: String,
    /// Destination id that makes every transfer fail after the debit
    pub fault_sentinel: Option<String>,
    // Keep the raw settings for preservation when saving
    raw: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            fault_sentinel: None,
            raw: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the remit directory, applying environment overrides
    pub fn load(remit_dir: &Path) -> Result<Self> {
        Self::load_with(remit_dir, |key| std::env::var(key).ok())
    }

    /// Load config with an explicit environment lookup
    pub fn load_with<F>(remit_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings_path = remit_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content)?
        } else {
            SettingsFile::default()
        };

        let database = env(ENV_DATABASE)
            .or_else(|| raw.database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        if database.trim().is_empty() {
            return Err(Error::config("database file name cannot be empty"));
        }

        let fault_sentinel = match env(ENV_FAULT_SENTINEL) {
            Some(value) if value.is_empty() => None,
            Some(value) => Some(value),
            None => raw.fault_injection.sentinel_id.clone(),
        };

        Ok(Self {
            database,
            fault_sentinel,
            raw,
        })
    }

    /// Save config to the remit directory
    ///
    /// Writes the settings as read from the file plus the toggles changed
    /// through this value. Environment overrides are never persisted.
    pub fn save(&self, remit_dir: &Path) -> Result<()> {
        let settings_path = remit_dir.join(SETTINGS_FILE);
        let content = serde_json::to_string_pretty(&self.raw)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Route transfers to `sentinel_id` into the fault-injection branch
    pub fn enable_fault_injection(&mut self, sentinel_id: impl Into<String>) {
        let sentinel_id = sentinel_id.into();
        self.raw.fault_injection.sentinel_id = Some(sentinel_id.clone());
        self.fault_sentinel = Some(sentinel_id);
    }

    pub fn disable_fault_injection(&mut self) {
        self.raw.fault_injection.sentinel_id = None;
        self.fault_sentinel = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_with(dir.path(), no_env).unwrap();
        assert_eq!(config.database, "remit.duckdb");
        assert!(config.fault_sentinel.is_none());
    }

    #[test]
    fn test_reads_settings_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"database": "bank.duckdb", "faultInjection": {"sentinelId": "ex"}}"#,
        )
        .unwrap();

        let config = Config::load_with(dir.path(), no_env).unwrap();
        assert_eq!(config.database, "bank.duckdb");
        assert_eq!(config.fault_sentinel.as_deref(), Some("ex"));
    }

    #[test]
    fn test_env_overrides() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"faultInjection": {"sentinelId": "ex"}}"#,
        )
        .unwrap();

        let config = Config::load_with(dir.path(), |key| match key {
            ENV_DATABASE => Some("override.duckdb".to_string()),
            ENV_FAULT_SENTINEL => Some(String::new()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.database, "override.duckdb");
        assert!(config.fault_sentinel.is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        assert!(matches!(
            Config::load_with(dir.path(), no_env),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"theme": "dark", "faultInjection": {"note": "keep"}}"#,
        )
        .unwrap();

        let mut config = Config::load_with(dir.path(), no_env).unwrap();
        config.enable_fault_injection("ex");
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["faultInjection"]["note"], "keep");
        assert_eq!(saved["faultInjection"]["sentinelId"], "ex");

        let reloaded = Config::load_with(dir.path(), no_env).unwrap();
        assert_eq!(reloaded.fault_sentinel.as_deref(), Some("ex"));
    }

    #[test]
    fn test_save_does_not_persist_env_overrides() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), r#"{"theme": "dark"}"#).unwrap();

        let mut config = Config::load_with(dir.path(), |key| match key {
            ENV_DATABASE => Some("tmp.duckdb".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.database, "tmp.duckdb");
        config.enable_fault_injection("ex");
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert!(saved.get("database").is_none(), "saved: {saved}");
        assert_eq!(saved["faultInjection"]["sentinelId"], "ex");

        let reloaded = Config::load_with(dir.path(), no_env).unwrap();
        assert_eq!(reloaded.database, "remit.duckdb");
        assert_eq!(reloaded.fault_sentinel.as_deref(), Some("ex"));
    }

    #[test]
    fn test_save_keeps_file_database_under_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"database": "bank.duckdb", "faultInjection": {"sentinelId": "ex"}}"#,
        )
        .unwrap();

        let mut config = Config::load_with(dir.path(), |key| match key {
            ENV_DATABASE => Some("tmp.duckdb".to_string()),
            _ => None,
        })
        .unwrap();
        config.disable_fault_injection();
        config.save(dir.path()).unwrap();

        let reloaded = Config::load_with(dir.path(), no_env).unwrap();
        assert_eq!(reloaded.database, "bank.duckdb");
        assert!(reloaded.fault_sentinel.is_none());
    }
}
