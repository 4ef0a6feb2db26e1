use journal_engine::DirectorySettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Last journal directory the user opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the stored directory
        config.directory = config
            .directory
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.config/journal").as_ref())
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// The config file as the journal's remembered-directory store.
///
/// A missing or unreadable file reads as "no directory"; the file is
/// rewritten every time a new directory is chosen.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Config {
        match Config::load_from_path(&self.path) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unusable config: {e}");
                Config::default()
            }
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Config::config_path())
    }
}

impl DirectorySettings for ConfigStore {
    fn last_directory(&self) -> Option<PathBuf> {
        self.read().directory
    }

    fn remember_directory(&mut self, directory: &Path) -> anyhow::Result<()> {
        let mut config = self.read();
        config.directory = Some(directory.to_path_buf());
        config.save_to_path(&self.path)?;
        log::info!(
            "Remembered {} in {}",
            directory.display(),
            self.path.display()
        );
        Ok(())
    }
}
