use std::fs::File;

use tracing::{debug, error, info};

use crate::config::ConnectionConfig;
use crate::error::TransferError;
use crate::session::TransferSession;
use crate::utils::derive_upload_name;

/// Uploads `local_path` into `base_path + remote_dir` on the server,
/// creating missing directory segments on the way down.
///
/// The local file is opened before any network activity so that a missing
/// source never touches the server. The file handle is owned by this scope
/// and released on every exit path.
pub(crate) fn put(
    config: &ConnectionConfig,
    local_path: &str,
    remote_dir: &str,
) -> Result<(), TransferError> {
    let mut input = File::open(local_path)?;

    let mut session = TransferSession::open(config)?;
    ensure_working_dir(&mut session, &config.base_path, remote_dir)?;

    let name = derive_upload_name(local_path);
    session.store(name, &mut input)?;
    info!("uploaded {} as {}", local_path, name);

    session.quit()?;
    Ok(())
}

/// Switches into `base + remote_dir`. If the full path cannot be entered,
/// walks each `/`-separated segment of `remote_dir` below `base`, entering
/// each and creating the ones that do not exist. `base` itself is never
/// created.
fn ensure_working_dir(
    session: &mut TransferSession,
    base: &str,
    remote_dir: &str,
) -> Result<(), TransferError> {
    let target = format!("{base}{remote_dir}");
    if session.enter_dir(&target)? {
        return Ok(());
    }
    debug!("{} does not exist yet, creating segments", target);

    let mut current = base.to_string();
    for segment in remote_dir.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        if session.enter_dir(&current)? {
            continue;
        }
        if !session.make_dir(&current)? {
            error!("failed to create remote directory {}", current);
            return Err(TransferError::RemoteDir(format!("cannot create '{current}'")));
        }
        if !session.enter_dir(&current)? {
            return Err(TransferError::RemoteDir(format!(
                "cannot enter '{current}' after creating it"
            )));
        }
    }
    Ok(())
}
