use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in each layer directory.
pub const CONFIG_FILENAME: &str = ".trellis.toml";

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

/// Task-board coordinates for the surrounding tooling.
///
/// The outline parser reads none of these; they are merged from the config
/// layers and handed to whatever pushes the parsed tree to a board.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub board: Option<String>,
    pub list: Option<String>,
    pub api_key: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Loads one config file; an absent file is `Ok(None)`, not an error.
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

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Loads and merges every file in `paths`, in order; later layers win
    /// field by field. Missing files are skipped.
    pub fn load_layered<I, P>(paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut config = Config::default();
        for path in paths {
            if let Some(layer) = Self::load_from_path(path)? {
                config = config.merge(layer);
            }
        }
        Ok(config)
    }

    /// Default layer locations: the current directory, then home.
    pub fn default_paths() -> Vec<PathBuf> {
        let home = shellexpand::tilde("~");
        vec![
            PathBuf::from(CONFIG_FILENAME),
            PathBuf::from(home.as_ref()).join(CONFIG_FILENAME),
        ]
    }

    fn merge(self, over: Config) -> Config {
        Config {
            board: over.board.or(self.board),
            list: over.list.or(self.list),
            api_key: over.api_key.or(self.api_key),
            token: over.token.or(self.token),
        }
    }
}
