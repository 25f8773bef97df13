use thiserror::Error;

/// Failure classes for transfer operations.
///
/// The boolean operations on [`crate::TransferClient`] log these and
/// collapse them to `false`; `list_dir` returns them to the caller.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("remote directory error: {0}")]
    RemoteDir(String),

    #[error("invalid remote path: {0}")]
    InvalidRemotePath(String),

    #[error("FTP error: {0}")]
    Ftp(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<suppaftp::FtpError> for TransferError {
    fn from(e: suppaftp::FtpError) -> Self {
        TransferError::Ftp(e.to_string())
    }
}
