use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use tracing::warn;

use crate::dashboard::DashboardConfig;

const CONFIG_ENV: &str = "INSIGHTS_CONFIG";
const MAX_WEEKLY_WINDOW_DAYS: i64 = 3650;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub recent_limit: usize,
    pub preview_chars: usize,
    pub weekly_window_days: i64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let dashboard = DashboardConfig::default();
        Self {
            recent_limit: dashboard.recent_limit,
            preview_chars: dashboard.preview_chars,
            weekly_window_days: dashboard.weekly_window_days,
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Like `load`, but any failure is logged and replaced with defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default config");
            Self::new()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.sanitize();
        Ok(config)
    }

    /// Replace out-of-range values with their defaults.
    fn sanitize(&mut self) {
        if !(1..=MAX_WEEKLY_WINDOW_DAYS).contains(&self.weekly_window_days) {
            let fallback = Self::default().weekly_window_days;
            warn!(
                weekly_window_days = self.weekly_window_days,
                fallback, "weekly window out of range, using default"
            );
            self.weekly_window_days = fallback;
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn dashboard(&self) -> DashboardConfig {
        DashboardConfig {
            recent_limit: self.recent_limit,
            preview_chars: self.preview_chars,
            weekly_window_days: self.weekly_window_days,
        }
    }

    /// `~/.config/insights`, home of the config file and the log.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("insights"))
    }

    fn get_config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        Ok(Self::config_dir()?.join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.dashboard(), DashboardConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            recent_limit: 10,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "preview_chars": 40 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.preview_chars, 40);
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.weekly_window_days, 7);
    }

    #[test]
    fn test_out_of_range_weekly_window_uses_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        for window in ["100000000", "0", "-3"] {
            fs::write(&path, format!(r#"{{ "weekly_window_days": {} }}"#, window)).unwrap();
            let config = Config::load_from(&path).unwrap();
            assert_eq!(config.weekly_window_days, 7);
        }

        fs::write(&path, r#"{ "weekly_window_days": 30 }"#).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().weekly_window_days, 30);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
