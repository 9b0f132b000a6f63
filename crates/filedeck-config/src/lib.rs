use std::env;
use std::path::{Path, PathBuf};

use filedeck_model::DateRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub palette_hotkey: String,
    pub theme: Theme,
    pub default_date_range: DateRange,
    /// Cap on displayed results after filtering. `0` shows everything.
    pub result_limit: usize,
    pub extra_commands: Vec<CommandEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    TerminalDark,
    TerminalLight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub id: String,
    pub label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette_hotkey: "Ctrl+K".to_string(),
            theme: Theme::TerminalDark,
            default_date_range: DateRange::Any,
            result_limit: 0,
            extra_commands: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn app_data_dir() -> PathBuf {
    let base = env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(base).join("FileDeck")
}

pub fn settings_path() -> PathBuf {
    app_data_dir().join("settings.json")
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            theme: Theme::TerminalLight,
            default_date_range: DateRange::Week,
            result_limit: 50,
            extra_commands: vec![CommandEntry {
                id: "open-logs".to_string(),
                label: "Open logs".to_string(),
            }],
            ..Settings::default()
        };
        save(&path, &settings).unwrap();

        assert_eq!(load(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_falls_back_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"default_date_range":"month"}"#).unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.default_date_range, DateRange::Month);
        assert_eq!(settings.palette_hotkey, "Ctrl+K");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn settings_live_under_app_data_dir() {
        assert!(settings_path().ends_with("FileDeck/settings.json"));
    }
}
