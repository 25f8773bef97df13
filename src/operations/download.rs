use std::fs::File;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::TransferError;
use crate::operations::list;
use crate::session::TransferSession;
use crate::utils::{normalize_separators, split_remote_path};

/// What the download body observed. The boolean surface maps both
/// variants to `true`; only errors map to `false`.
pub(crate) enum DownloadOutcome {
    Retrieved(PathBuf),
    NotFound { name: String },
}

/// Downloads the remote file at `remote_path` into the local directory
/// `local_dir`, under the remote entry's own name.
///
/// Both paths are normalized first (backslashes to forward slashes, runs
/// of slashes collapsed). `remote_path` must contain at least one `/`; it
/// is split into the parent directory, which becomes the working
/// directory, and the bare filename, which is matched exactly against the
/// directory's entries.
pub(crate) fn get(
    config: &ConnectionConfig,
    remote_path: &str,
    local_dir: &str,
) -> Result<DownloadOutcome, TransferError> {
    let remote_path = normalize_separators(remote_path);
    let local_dir = normalize_separators(local_dir);

    let mut session = TransferSession::open(config)?;

    let (dir, name) = split_remote_path(&remote_path).ok_or_else(|| {
        TransferError::InvalidRemotePath(format!("'{remote_path}' has no directory component"))
    })?;
    session.change_dir(dir)?;
    debug!("looking for {} in {}", name, dir);

    let entries = list::read_dir(&mut session)?;
    let Some(entry) = entries.iter().find(|e| e.name == name) else {
        session.quit()?;
        return Ok(DownloadOutcome::NotFound {
            name: name.to_string(),
        });
    };

    let local_file = PathBuf::from(format!("{local_dir}/{}", entry.name));
    let mut output = File::create(&local_file)?;
    session.retrieve(&entry.name, &mut output)?;
    info!("retrieved {} into {}", entry.name, local_file.display());

    session.quit()?;
    Ok(DownloadOutcome::Retrieved(local_file))
}
