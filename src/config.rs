use std::{
    io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_VAR: &str = "LSH_CONFIG";
pub const LOG_DIR_VAR: &str = "LSH_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Printed before every interactive read.
    pub prompt: String,
    /// Search path the session starts with.
    pub default_path: Vec<PathBuf>,
    /// Maximum tokens (command name included) in one command.
    pub max_args: usize,
    /// Maximum `&`-separated commands on one line.
    pub max_parallel: usize,
    /// Maximum search path entries kept by `path`.
    pub path_capacity: usize,
    /// Directory for the log file. Logging to a file is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "lsh> ".into(),
            default_path: vec![PathBuf::from("/bin")],
            max_args: 64,
            max_parallel: 63,
            path_capacity: 1024,
            log_dir: None,
        }
    }
}

impl ShellConfig {
    /// Loads the file named by `LSH_CONFIG` (defaults otherwise), then applies
    /// `LSH_LOG_DIR`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(dir) = std::env::var_os(LOG_DIR_VAR) {
            config.log_dir = Some(dir.into());
        }

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}
