use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Well-known configuration location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "ftp.toml";

/// Errors raised while loading a [`ConnectionConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Connection settings for the remote FTP server.
///
/// Loaded once from a TOML file carrying an `[ftp]` table and immutable
/// afterwards. Recognized keys: `ftp.host`, `ftp.port`, `ftp.username`,
/// `ftp.password`, `ftp.base-path`, `ftp.file-path`. All keys are
/// required; a malformed port fails the load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Root directory on the server under which uploads are placed.
    pub base_path: String,
    /// Subdirectory below `base_path`, e.g. a date partition like
    /// `/2015/01/01`. Not consumed by the operations themselves; callers
    /// pass it (or any other directory) as the upload target.
    pub file_path: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    ftp: ConnectionConfig,
}

impl ConnectionConfig {
    /// Loads connection settings from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML or a required key
    /// is missing or has the wrong type.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let config = file.ftp;
        debug!(
            "ftp configuration loaded: host={}, port={}, username={}, base_path={}",
            config.host, config.port, config.username, config.base_path
        );
        Ok(config)
    }

    /// Loads connection settings from [`DEFAULT_CONFIG_PATH`].
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    pub(crate) fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
