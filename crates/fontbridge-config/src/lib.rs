//! Configuration for the fontbridge session
//!
//! The config file is TOML. Its location is, in order:
//! 1. the `FONTBRIDGE_CONFIG` environment variable,
//! 2. a pointer file `.fontbridge_config_path` next to the default location,
//! 3. `~/.config/fontbridge/fontbridge.toml`.

pub mod venv_paths;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the Python module imported when the session starts
pub const DEFAULT_MODULE: &str = "fontforge";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "FONTBRIDGE_CONFIG";

const POINTER_FILE: &str = ".fontbridge_config_path";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const CONFIG_KEYS: &[&str] = &["venv-path", "module", "python-home"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Unknown config key: {0}. Supported keys: venv-path, module, python-home")]
    UnknownKey(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Virtual environment whose site-packages are added to `sys.path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venv_path: Option<String>,
    /// Domain module to import, defaults to [`DEFAULT_MODULE`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Value exported as PYTHONHOME before the interpreter starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_home: Option<String>,
}

impl Config {
    /// Resolve the config file path
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let default = Self::default_path()?;

        if let Some(parent) = default.parent() {
            let pointer = parent.join(POINTER_FILE);
            if let Ok(contents) = fs::read_to_string(&pointer) {
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    return Ok(PathBuf::from(trimmed));
                }
            }
        }

        Ok(default)
    }

    /// Default config location, ignoring overrides
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        #[cfg(not(target_os = "windows"))]
        let dir = dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let dir = dirs::config_dir().ok_or(ConfigError::NoHomeDir)?;

        Ok(dir.join("fontbridge").join("fontbridge.toml"))
    }

    /// Pointer file that redirects the config location
    pub fn pointer_path() -> Result<PathBuf, ConfigError> {
        let default = Self::default_path()?;
        Ok(default
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(POINTER_FILE))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path; a missing file yields the default config
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "venv-path" => self.venv_path.clone(),
            "module" => self.module.clone(),
            "python-home" => self.python_home.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "venv-path" => self.venv_path = Some(value),
            "module" => self.module = Some(value),
            "python-home" => self.python_home = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.venv_path.is_none() && self.module.is_none() && self.python_home.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Module imported by the session
    pub fn module_name(&self) -> &str {
        self.module
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODULE)
    }

    pub fn venv_path(&self) -> Option<PathBuf> {
        self.venv_path.as_deref().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::default();
        assert!(config.is_empty());
        assert_eq!(config.module_name(), "fontforge");
    }

    #[test]
    fn test_config_set_get() {
        let mut config = Config::default();
        assert!(config.set("venv-path", "/opt/venv".to_string()).is_ok());
        assert_eq!(config.get("venv-path"), Some("/opt/venv".to_string()));
        assert_eq!(config.venv_path(), Some(PathBuf::from("/opt/venv")));
        assert!(!config.is_empty());
    }

    #[test]
    fn test_config_unknown_key() {
        let mut config = Config::default();
        let result = config.set("unknown-key", "value".to_string());
        assert!(matches!(result, Err(ConfigError::UnknownKey(ref k)) if k == "unknown-key"));
        assert_eq!(config.get("unknown-key"), None);
    }

    #[test]
    fn test_blank_module_falls_back_to_default() {
        let config = Config {
            module: Some("  ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.module_name(), DEFAULT_MODULE);
    }

    #[test]
    fn test_values_iter_follows_key_order() {
        let config = Config {
            venv_path: Some("/v".to_string()),
            module: None,
            python_home: Some("/usr".to_string()),
        };
        let values = config.values_iter();
        assert_eq!(
            values,
            vec![("venv-path", "/v".to_string()), ("python-home", "/usr".to_string())]
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let path = dir.path().join("sub").join("fontbridge.toml");
        let config = Config {
            venv_path: None,
            module: Some("fontforge".to_string()),
            python_home: None,
        };
        assert!(config.save_to(&path).is_ok());

        let loaded = Config::load_from(&path);
        assert!(matches!(loaded, Ok(ref c) if *c == config));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let loaded = Config::load_from(Path::new("/nonexistent/fontbridge.toml"));
        assert!(matches!(loaded, Ok(ref c) if c.is_empty()));
    }

    #[test]
    fn test_load_invalid_toml() {
        let Ok(dir) = TempDir::new() else {
            return;
        };
        let path = dir.path().join("fontbridge.toml");
        assert!(fs::write(&path, "module = [").is_ok());
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
