use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::TheatreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub bookmarks: BookmarkConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkConfig {
    /// Preference entry holding the persisted bookmark collection.
    pub preference_key: String,
    /// Maximum number of bookmarks listed in the bookmark menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Volume applied to the engine when a player starts, 0.0 to 1.0.
    pub volume: f32,
}

impl AppConfig {
    /// Load config: user file if it exists, otherwise the built-in defaults.
    pub fn load() -> Result<Self, TheatreError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| TheatreError::Config(e.to_string()))
        }
    }

    /// Load config from an explicit TOML file.
    pub fn load_from(path: &std::path::Path) -> Result<Self, TheatreError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| TheatreError::Config(e.to_string()))?;
        toml::from_str(&content).map_err(|e| TheatreError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), TheatreError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TheatreError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, Application Support on macOS).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the preference database.
    pub fn prefs_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().join("theatre.db"))
            .unwrap_or_else(|| PathBuf::from("theatre.db"))
    }

    /// Ensure the data directory exists and return the preference database path.
    pub fn ensure_prefs_path() -> Result<PathBuf, TheatreError> {
        let path = Self::prefs_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "theatre")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.bookmarks.preference_key, "DVDBookmarks");
        assert_eq!(config.bookmarks.menu_limit, None);
        assert_eq!(config.player.volume, 1.0);
        assert!(config.general.log_filter.contains("theatre"));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = AppConfig::default();
        config.bookmarks.menu_limit = Some(20);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.bookmarks.menu_limit, Some(20));
        assert_eq!(
            deserialized.bookmarks.preference_key,
            config.bookmarks.preference_key
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\nlog_filter = \"debug\"\n\n[bookmarks]\npreference_key = \"Marks\"\nmenu_limit = 5\n\n[player]\nvolume = 0.5\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.bookmarks.preference_key, "Marks");
        assert_eq!(config.bookmarks.menu_limit, Some(5));
        assert_eq!(config.player.volume, 0.5);
    }

    #[test]
    fn test_load_from_invalid_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(TheatreError::Config(_))
        ));
    }
}
