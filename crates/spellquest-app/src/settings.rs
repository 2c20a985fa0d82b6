//! User-editable settings, loaded from an optional JSON file.
//!
//! Every field has a default, so a settings file only needs the keys it
//! changes:
//!
//! ```json
//! {
//!   "generator": { "grid": { "policy": "fit", "min": 10 } },
//!   "storage": { "data_dir": "/var/lib/spellquest" }
//! }
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use spellquest_core::Direction;
use spellquest_generator::{GeneratorConfig, GridSizePolicy};

/// Errors raised while loading settings.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[display("failed to read settings {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    /// The settings file is not valid JSON for [`Settings`].
    #[display("invalid settings {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A direction name is not one of the eight known directions.
    #[display("unknown direction {_0:?}")]
    UnknownDirection(#[error(not(source))] String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub storage: StorageSettings,
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Json {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Grid sizing as written in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GridSetting {
    Fixed { size: usize },
    Fit { min: usize },
}

impl From<GridSetting> for GridSizePolicy {
    fn from(setting: GridSetting) -> Self {
        match setting {
            GridSetting::Fixed { size } => Self::Fixed(size),
            GridSetting::Fit { min } => Self::FitToWords { min },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub grid: GridSetting,
    /// Direction names such as `"right"` or `"down-right"`.
    pub directions: Vec<String>,
    pub max_attempts: usize,
    pub keep_hyphens: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            grid: GridSetting::Fixed {
                size: GeneratorConfig::DEFAULT_SIZE,
            },
            directions: Direction::FORWARD.iter().map(ToString::to_string).collect(),
            max_attempts: GeneratorConfig::DEFAULT_MAX_ATTEMPTS,
            keep_hyphens: true,
        }
    }
}

impl GeneratorSettings {
    /// Builds the generator configuration.
    pub fn to_config(&self) -> Result<GeneratorConfig, SettingsError> {
        let directions = self
            .directions
            .iter()
            .map(|name| {
                Direction::from_name(name).ok_or_else(|| SettingsError::UnknownDirection(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GeneratorConfig::default()
            .size_policy(self.grid.into())
            .directions(&directions)
            .max_attempts(self.max_attempts)
            .keep_hyphens(self.keep_hyphens))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root of the [`DirectoryStore`](spellquest_progress::DirectoryStore).
    pub data_dir: PathBuf,
    /// Local profile cache file.
    pub cache_file: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("spellquest-data"),
            cache_file: PathBuf::from("spellquest-cache.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_generator_defaults() {
        let config = Settings::default().generator.to_config().unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                "generator": {
                    "grid": { "policy": "fit", "min": 10 },
                    "directions": ["right", "Down", "up-left"]
                },
                "storage": { "data_dir": "data" }
            }"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.storage.data_dir, PathBuf::from("data"));
        assert_eq!(
            settings.storage.cache_file,
            StorageSettings::default().cache_file
        );

        let config = settings.generator.to_config().unwrap();
        assert_eq!(
            config.grid_size_policy(),
            GridSizePolicy::FitToWords { min: 10 }
        );
        assert_eq!(
            config.allowed_directions(),
            [Direction::Right, Direction::Down, Direction::UpLeft]
        );
        assert_eq!(config.attempts_per_word(), 100);
    }

    #[test]
    fn test_unknown_direction() {
        let settings = GeneratorSettings {
            directions: vec!["sideways".to_owned()],
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            settings.to_config(),
            Err(SettingsError::UnknownDirection(name)) if name == "sideways"
        ));
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            Settings::load(Some(&missing)),
            Err(SettingsError::Io { .. })
        ));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{ "generator": { "grid": { "policy": "huge" } } }"#).unwrap();
        assert!(matches!(
            Settings::load(Some(&invalid)),
            Err(SettingsError::Json { .. })
        ));

        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}
