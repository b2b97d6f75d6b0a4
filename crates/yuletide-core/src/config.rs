//! TOML-based application configuration.
//!
//! Stores:
//! - Background watch cadence
//! - Menu retry threshold
//! - Which host date source to use
//! - Default log filter
//!
//! Configuration is stored at `~/.config/yuletide/config.toml`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::date::{ClockDateSource, CommandDateSource, DateSource};
use crate::error::{ConfigError, CoreError, Result};
use crate::session::{SessionSettings, DEFAULT_MAX_INVALID_ATTEMPTS};

/// Returns `~/.config/yuletide[-dev]/` based on YULETIDE_ENV.
///
/// Set YULETIDE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("YULETIDE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("yuletide-dev")
    } else {
        base_dir.join("yuletide")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_max_invalid_attempts")]
    pub max_invalid_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSourceKind {
    /// Local wall clock via chrono.
    #[default]
    Clock,
    /// Host `date` command output.
    Command,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateConfig {
    #[serde(default)]
    pub source: DateSourceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when YULETIDE_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/yuletide/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub date: DateConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_interval_ms() -> u64 {
    1000
}
fn default_max_invalid_attempts() -> u32 {
    DEFAULT_MAX_INVALID_ATTEMPTS
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_invalid_attempts: default_max_invalid_attempts(),
        }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            source: DateSourceKind::Clock,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch: WatchConfig::default(),
            prompt: PromptConfig::default(),
            date: DateConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("cannot parse '{value}': {e}")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as number: {e}")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default path, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watch.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "watch.interval_ms".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            CoreError::from(ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            interval: Duration::from_millis(self.watch.interval_ms),
            max_invalid_attempts: self.prompt.max_invalid_attempts,
        }
    }

    pub fn date_source(&self) -> Arc<dyn DateSource> {
        match self.date.source {
            DateSourceKind::Clock => Arc::new(ClockDateSource),
            DateSourceKind::Command => Arc::new(CommandDateSource::host()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.watch.interval_ms, 1000);
        assert_eq!(cfg.prompt.max_invalid_attempts, 2);
        assert_eq!(cfg.date.source, DateSourceKind::Clock);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let cfg: Config = toml::from_str("[watch]\ninterval_ms = 250\n").unwrap();
        assert_eq!(cfg.watch.interval_ms, 250);
        assert_eq!(cfg.prompt.max_invalid_attempts, 2);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("watch.interval_ms").as_deref(), Some("1000"));
        assert_eq!(cfg.get("date.source").as_deref(), Some("clock"));
        assert!(cfg.get("watch.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_number_and_enum() {
        let mut cfg = Config::default();
        cfg.set("prompt.max_invalid_attempts", "5").unwrap();
        cfg.set("date.source", "command").unwrap();
        assert_eq!(cfg.prompt.max_invalid_attempts, 5);
        assert_eq!(cfg.date.source, DateSourceKind::Command);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(cfg.set("watch.nonexistent_key", "1").is_err());
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("watch.interval_ms", "soon").is_err());
        assert!(cfg.set("watch.interval_ms", "0").is_err());
        assert!(cfg.set("date.source", "sundial").is_err());
        assert!(cfg.set("watch", "1").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_creates_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("watch.interval_ms", "50").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().watch.interval_ms, 50);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "watch = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn session_settings_follow_config() {
        let mut cfg = Config::default();
        cfg.set("watch.interval_ms", "250").unwrap();
        let settings = cfg.session_settings();
        assert_eq!(settings.interval, Duration::from_millis(250));
        assert_eq!(settings.max_invalid_attempts, 2);
    }
}
