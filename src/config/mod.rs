//! Persistent settings
//!
//! Stored as pretty JSON in `~/.config/accent-hold/config.json`.

pub mod autostart;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::accents::{Language, LookupConfig};
use crate::common::constants::app;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gesture monitoring enabled
    pub active: bool,
    pub start_hidden: bool,
    /// Launch at login through an XDG autostart entry
    pub auto_start: bool,
    /// Draw candidates from every character set, ignoring `character_sets`
    pub all_character_sets: bool,
    /// Language codes (`"FR"`, `"DE"`), in lookup order
    pub character_sets: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            active: true,
            start_hidden: true,
            auto_start: true,
            all_character_sets: true,
            character_sets: Vec::new(),
        }
    }
}

/// Path of the settings file
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app::NAME)
        .join(app::CONFIG_FILE)
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Missing or empty files yield the defaults, unreadable ones are an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Writes to a sibling temp file first so a crash never leaves a truncated config
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, contents)
            .with_context(|| format!("Failed to write config to {}", staging.display()))?;
        fs::rename(&staging, path)
            .with_context(|| format!("Failed to move config into place at {}", path.display()))?;

        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Snapshot handed to a single accent lookup
    pub fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            all_character_sets: self.all_character_sets,
            character_sets: self.character_sets.clone(),
        }
    }

    /// Replaces the language list. Codes are normalized to their canonical spelling;
    /// all-languages mode is on exactly when `ALL` is among them and is never stored.
    pub fn set_character_sets<S: AsRef<str>>(&mut self, codes: &[S]) -> Result<()> {
        let mut sets = Vec::new();
        let mut all = false;

        for code in codes {
            let code = code.as_ref();
            let Some(language) = Language::from_code(code) else {
                bail!("Unknown character set '{code}' (see `accent-hold languages`)");
            };
            if language == Language::All {
                all = true;
            } else if !sets.iter().any(|known| known == language.code()) {
                sets.push(language.code().to_string());
            }
        }

        self.character_sets = sets;
        self.all_character_sets = all;
        Ok(())
    }

    pub fn set_all_character_sets(&mut self, enabled: bool) {
        self.all_character_sets = enabled;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_start_hidden(&mut self, hidden: bool) {
        self.start_hidden = hidden;
    }

    /// Stores the flag and installs or removes the autostart entry to match
    pub fn set_auto_start(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            let exec = std::env::current_exe().context("Failed to locate own executable")?;
            autostart::install(&autostart::entry_path(), &exec)?;
        } else {
            autostart::remove(&autostart::entry_path())?;
        }
        self.auto_start = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let config = AppConfig::load_from(&temp.path().join("config.json")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(config.active);
        assert!(config.start_hidden);
        assert!(config.auto_start);
        assert!(config.all_character_sets);
        assert!(config.character_sets.is_empty());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ \"active\": ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "active": false, "character_sets": ["FR"] }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(!config.active);
        assert!(config.all_character_sets);
        assert_eq!(config.character_sets, vec!["FR"]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.set_active(false);
        config.set_all_character_sets(false);
        config.set_character_sets(&["fr", "de"]).unwrap();
        config.save_to(&path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_set_character_sets_normalizes_and_dedups() {
        let mut config = AppConfig::default();
        config.set_all_character_sets(false);
        config
            .set_character_sets(&["fr", " DE ", "Fr", "sr_cyrl"])
            .unwrap();

        assert_eq!(config.character_sets, vec!["FR", "DE", "SR_CYRL"]);
        assert!(!config.all_character_sets);
    }

    #[test]
    fn test_explicit_languages_leave_all_languages_mode() {
        let mut config = AppConfig::default();
        assert!(config.all_character_sets);

        config.set_character_sets(&["DE"]).unwrap();

        assert!(!config.all_character_sets);
        assert_eq!(
            crate::accents::lookup(',', &config.lookup_config()),
            ["„", "\"", ".", "'", "»", "«", "›", "‹"]
        );
    }

    #[test]
    fn test_set_character_sets_rejects_unknown_codes() {
        let mut config = AppConfig::default();
        config.set_character_sets(&["FR"]).unwrap();

        assert!(config.set_character_sets(&["FR", "XX"]).is_err());
        assert_eq!(config.character_sets, vec!["FR"]);
    }

    #[test]
    fn test_all_code_enables_all_languages() {
        let mut config = AppConfig::default();
        config.set_all_character_sets(false);
        config.set_character_sets(&["ALL", "PL"]).unwrap();

        assert!(config.all_character_sets);
        assert_eq!(config.character_sets, vec!["PL"]);
    }

    #[test]
    fn test_lookup_config_snapshot() {
        let mut config = AppConfig::default();
        config.set_all_character_sets(false);
        config.set_character_sets(&["DE"]).unwrap();

        let snapshot = config.lookup_config();
        config.set_character_sets(&["FR"]).unwrap();

        assert_eq!(
            snapshot,
            LookupConfig {
                all_character_sets: false,
                character_sets: vec!["DE".to_string()],
            }
        );
    }
}
