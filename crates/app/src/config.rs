//! Player settings read from a TOML file and merged with command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use dungeon_core::{DimensionError, Dimensions, GenerationBudget};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::APP_NAME;

pub const DEFAULT_WORKERS: usize = 4;

/// Every field is optional; anything left out falls back to the next source.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DungeonConfig {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub workers: Option<usize>,
    pub seed: Option<u64>,
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config file {} is not valid", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("rows and columns must be given together (rows: {rows:?}, columns: {columns:?})")]
    PartialSize { rows: Option<usize>, columns: Option<usize> },
    #[error("at least one generation worker is required")]
    NoWorkers,
    #[error(transparent)]
    Dimensions(#[from] DimensionError),
}

/// Settings after every source has been applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Fixed size for every round; `None` means the player is asked each time.
    pub dimensions: Option<Dimensions>,
    pub workers: usize,
    pub budget: GenerationBudget,
}

impl DungeonConfig {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Like [`DungeonConfig::load`], but a missing file yields the empty config.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Fields set in `overrides` replace ours.
    pub fn overridden_by(self, overrides: DungeonConfig) -> DungeonConfig {
        DungeonConfig {
            rows: overrides.rows.or(self.rows),
            columns: overrides.columns.or(self.columns),
            workers: overrides.workers.or(self.workers),
            seed: overrides.seed.or(self.seed),
            max_attempts: overrides.max_attempts.or(self.max_attempts),
        }
    }

    pub fn resolve(&self) -> Result<Settings, ConfigError> {
        let dimensions = match (self.rows, self.columns) {
            (Some(rows), Some(columns)) => Some(Dimensions::new(rows, columns)?),
            (None, None) => None,
            (rows, columns) => return Err(ConfigError::PartialSize { rows, columns }),
        };
        let workers = self.workers.unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        let budget =
            self.max_attempts.map_or(GenerationBudget::Unbounded, GenerationBudget::Attempts);
        Ok(Settings { dimensions, workers, budget })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_partial_config_from_toml() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "rows = 5\ncolumns = 7\nseed = 99\n").expect("write config");

        let config = DungeonConfig::load(&path).expect("load config");
        assert_eq!(
            config,
            DungeonConfig {
                rows: Some(5),
                columns: Some(7),
                seed: Some(99),
                ..DungeonConfig::default()
            }
        );
    }

    #[test]
    fn missing_file_is_the_empty_config() {
        let dir = tempdir().expect("create temp dir");
        let config = DungeonConfig::load_or_default(&dir.path().join("absent.toml"))
            .expect("missing file is not an error");
        assert_eq!(config, DungeonConfig::default());
    }

    #[test]
    fn malformed_file_is_reported_with_its_path() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "rows = \"many\"\n").expect("write config");

        let err = DungeonConfig::load_or_default(&path).expect_err("bad value should fail");
        assert!(matches!(err, ConfigError::Parse { .. }), "unexpected error: {err:?}");
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<DungeonConfig>("colour = \"red\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn overrides_replace_only_the_fields_they_set() {
        let file = DungeonConfig {
            rows: Some(5),
            columns: Some(5),
            workers: Some(2),
            ..Default::default()
        };
        let cli = DungeonConfig { columns: Some(9), max_attempts: Some(10), ..Default::default() };

        let merged = file.overridden_by(cli);
        assert_eq!(merged.rows, Some(5));
        assert_eq!(merged.columns, Some(9));
        assert_eq!(merged.workers, Some(2));
        assert_eq!(merged.max_attempts, Some(10));
    }

    #[test]
    fn resolve_applies_defaults() {
        let settings = DungeonConfig::default().resolve().expect("defaults are valid");
        assert_eq!(settings.dimensions, None);
        assert_eq!(settings.workers, DEFAULT_WORKERS);
        assert_eq!(settings.budget, GenerationBudget::Unbounded);

        let capped = DungeonConfig { max_attempts: Some(3), ..Default::default() };
        assert_eq!(capped.resolve().expect("valid").budget, GenerationBudget::Attempts(3));
    }

    #[test]
    fn resolve_rejects_unusable_settings() {
        let half = DungeonConfig { rows: Some(4), ..Default::default() };
        assert!(matches!(half.resolve(), Err(ConfigError::PartialSize { .. })));

        let idle = DungeonConfig { workers: Some(0), ..Default::default() };
        assert!(matches!(idle.resolve(), Err(ConfigError::NoWorkers)));

        let cramped = DungeonConfig { rows: Some(2), columns: Some(2), ..Default::default() };
        assert!(matches!(cramped.resolve(), Err(ConfigError::Dimensions(_))));
    }
}
