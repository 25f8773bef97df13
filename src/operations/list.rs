use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::TransferError;
use crate::session::TransferSession;
use crate::types::RemoteEntry;

/// Parses the entries of the session's current working directory.
/// Listing lines that match neither the Unix nor the DOS format are
/// skipped.
pub(crate) fn read_dir(session: &mut TransferSession) -> Result<Vec<RemoteEntry>, TransferError> {
    let lines = session.list()?;
    let entries: Vec<RemoteEntry> = lines
        .iter()
        .filter_map(|line| RemoteEntry::parse(line))
        .collect();
    debug!("{} entries in remote working directory", entries.len());
    Ok(entries)
}

/// Full listing operation: opens a session, enters `remote_dir` and
/// returns its parsed entries.
pub(crate) fn ls(
    config: &ConnectionConfig,
    remote_dir: &str,
) -> Result<Vec<RemoteEntry>, TransferError> {
    let mut session = TransferSession::open(config)?;
    session.change_dir(remote_dir)?;
    let entries = read_dir(&mut session)?;
    session.quit()?;
    Ok(entries)
}
