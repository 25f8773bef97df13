use tracing::{error, warn};

use crate::config::{ConfigError, ConnectionConfig};
use crate::error::TransferError;
use crate::operations::download::DownloadOutcome;
use crate::operations::{download, list, upload};
use crate::types::RemoteEntry;

/// FTP client for one-shot transfer operations against a remote server
///
/// Every operation opens its own connection, runs the transfer and
/// releases the connection before returning; nothing is shared between
/// calls except the read-only configuration, so a client can be used from
/// multiple threads with each call owning an independent connection.
#[derive(Debug, Clone)]
pub struct TransferClient {
    pub(crate) config: ConnectionConfig,
}

impl TransferClient {
    /// Creates a client from an already loaded configuration
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Creates a client from the well-known configuration location
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed;
    /// there is no partially configured client state.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = TransferClient::from_default_config()?;
    /// ```
    pub fn from_default_config() -> Result<Self, ConfigError> {
        Ok(Self::new(ConnectionConfig::load_default()?))
    }

    /// The connection settings this client was built with
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Uploads a local file to the remote server
    ///
    /// The target directory is `base_path + remote_dir`; intermediate
    /// segments of `remote_dir` are created when missing. The destination
    /// filename is the last path segment of `local_path` (both `/` and
    /// `\` separators are recognized).
    ///
    /// # Arguments
    ///
    /// * `local_path` - Path to the local file to upload
    /// * `remote_dir` - Server directory below the configured base path,
    ///   e.g. a date partition like `/2015/01/01`
    ///
    /// # Returns
    ///
    /// `true` on success. Every failure (missing local file, connection
    /// or login rejection, directory creation failure, transfer failure)
    /// is logged and collapses to `false`; nothing is raised to the
    /// caller.
    ///
    /// # Example
    ///
    /// ```ignore
    /// if client.upload_file("/local/report.xlsx", "/2015/01/01") {
    ///     println!("uploaded");
    /// }
    /// ```
    pub fn upload_file(&self, local_path: &str, remote_dir: &str) -> bool {
        match upload::put(&self.config, local_path, remote_dir) {
            Ok(()) => true,
            Err(e) => {
                error!("upload of {} failed: {}", local_path, e);
                false
            }
        }
    }

    /// Downloads a single named remote file into a local directory
    ///
    /// `remote_path` must contain at least one `/`: its parent becomes the
    /// remote working directory and its last segment is matched exactly
    /// against the directory listing. The file lands at
    /// `local_dir/<entry name>`.
    ///
    /// # Arguments
    ///
    /// * `remote_path` - Remote file path; separators are normalized
    /// * `local_dir` - Existing local directory to place the file in
    ///
    /// # Returns
    ///
    /// `true` when no failure occurred, including when the remote
    /// directory holds no entry of that name, in which case nothing is
    /// downloaded and a warning is logged. Only failures (connection,
    /// login, missing parent directory, local I/O, transfer) return
    /// `false`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// if client.download_file("/data/2015/01/01/report.xlsx", "/tmp") {
    ///     println!("done");
    /// }
    /// ```
    pub fn download_file(&self, remote_path: &str, local_dir: &str) -> bool {
        match download::get(&self.config, remote_path, local_dir) {
            Ok(DownloadOutcome::Retrieved(_)) => true,
            Ok(DownloadOutcome::NotFound { name }) => {
                warn!("no entry named {} in the remote directory, nothing downloaded", name);
                true
            }
            Err(e) => {
                error!("download of {} failed: {}", remote_path, e);
                false
            }
        }
    }

    /// Lists the contents of a remote directory
    ///
    /// # Arguments
    ///
    /// * `remote_dir` - Path to the remote directory
    ///
    /// # Returns
    ///
    /// The parsed entries of the directory. Listing lines in neither the
    /// Unix nor the DOS format are skipped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// for entry in client.list_dir("/data/2015/01/01")? {
    ///     println!("{} ({} bytes)", entry.name, entry.size);
    /// }
    /// ```
    pub fn list_dir(&self, remote_dir: &str) -> Result<Vec<RemoteEntry>, TransferError> {
        list::ls(&self.config, remote_dir)
    }
}
