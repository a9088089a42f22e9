use crate::services::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides `api_base_url` when set
pub const API_URL_ENV: &str = "SPACEX_TUI_API";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// No timeout when absent
    pub request_timeout_secs: Option<u64>,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".spacex-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Config file (or defaults) with the environment override applied
    pub fn resolve() -> Config {
        let mut config = Self::load().unwrap_or_default();
        config.apply_url_override(env::var(API_URL_ENV).ok());
        config
    }

    /// Replace `api_base_url` unless the override is absent or blank
    fn apply_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    /// Write the defaults on first run so there is a file to edit.
    /// Returns whether a file was written.
    pub fn ensure_exists() -> anyhow::Result<bool> {
        match Self::config_path() {
            Some(path) if !path.exists() => {
                Self::default().save()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("spacex-tui-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = scratch_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, r#"{"request_timeout_secs": 10}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let path = dir.join("nested").join("config.json");
        let config = Config {
            api_base_url: "http://10.0.0.2:5000".to_string(),
            request_timeout_secs: Some(3),
            log_level: "debug".to_string(),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), Some(config));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_or_invalid_file() {
        let dir = scratch_dir("invalid");
        assert!(Config::load_from(&dir.join("config.json")).is_none());

        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_url_override_replaces_file_value() {
        let mut config = Config::default();
        config.apply_url_override(Some("http://launches.internal:8080".to_string()));
        assert_eq!(config.api_base_url, "http://launches.internal:8080");
    }

    #[test]
    fn test_blank_or_missing_override_is_ignored() {
        let mut config = Config {
            api_base_url: "http://10.0.0.2:5000".to_string(),
            ..Config::default()
        };
        config.apply_url_override(None);
        config.apply_url_override(Some("   ".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn test_resolve_reads_override_from_environment() {
        // Only this test touches the variable
        env::set_var(API_URL_ENV, "http://127.0.0.1:5999");
        let config = Config::resolve();
        env::remove_var(API_URL_ENV);
        assert_eq!(config.api_base_url, "http://127.0.0.1:5999");
    }
}
