use std::io::{Read, Write};

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream, Mode};
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::error::TransferError;

/// Chunk size for streaming file contents over the data connection.
const TRANSFER_BUFFER_SIZE: usize = 1024;

/// One live FTP connection, created per operation call and always released
/// before the call returns.
///
/// [`TransferSession::open`] runs the connect, login, passive-mode and
/// binary-type sequence; the server greeting is validated by the protocol
/// client during connect. The success path ends with an explicit
/// [`quit`](TransferSession::quit); on every other path the drop handler
/// tears the connection down and swallows any error.
pub(crate) struct TransferSession {
    stream: Option<FtpStream>,
}

impl TransferSession {
    pub(crate) fn open(config: &ConnectionConfig) -> Result<Self, TransferError> {
        let addr = config.addr();
        debug!("connecting to {}", addr);
        let stream = FtpStream::connect(&addr)
            .map_err(|e| TransferError::Connection(format!("{addr}: {e}")))?;

        // The session owns the stream from here on, so a failure below
        // still releases the connection through the drop handler.
        let mut session = Self {
            stream: Some(stream),
        };
        session.authenticate(config)?;
        Ok(session)
    }

    fn authenticate(&mut self, config: &ConnectionConfig) -> Result<(), TransferError> {
        let stream = self.stream()?;
        stream
            .login(&config.username, &config.password)
            .map_err(|e| TransferError::Auth(format!("user '{}': {e}", config.username)))?;
        info!("{}: server connection established", config.host);

        stream.set_mode(Mode::Passive);
        stream.transfer_type(FileType::Binary)?;
        Ok(())
    }

    fn stream(&mut self) -> Result<&mut FtpStream, TransferError> {
        self.stream
            .as_mut()
            .ok_or_else(|| TransferError::Ftp("session already closed".to_string()))
    }

    /// Switches the working directory, failing the operation if the server
    /// refuses.
    pub(crate) fn change_dir(&mut self, path: &str) -> Result<(), TransferError> {
        self.stream()?
            .cwd(path)
            .map_err(|e| TransferError::RemoteDir(format!("cannot enter '{path}': {e}")))
    }

    /// Attempts to switch the working directory. `Ok(false)` means the
    /// server rejected the path; transport failures are still errors.
    pub(crate) fn enter_dir(&mut self, path: &str) -> Result<bool, TransferError> {
        match self.stream()?.cwd(path) {
            Ok(()) => Ok(true),
            Err(FtpError::UnexpectedResponse(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Attempts to create a remote directory. `Ok(false)` means the server
    /// rejected the creation; transport failures are still errors.
    pub(crate) fn make_dir(&mut self, path: &str) -> Result<bool, TransferError> {
        match self.stream()?.mkdir(path) {
            Ok(()) => Ok(true),
            Err(FtpError::UnexpectedResponse(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Streams `reader` to `name` in the current working directory.
    pub(crate) fn store(&mut self, name: &str, reader: &mut impl Read) -> Result<(), TransferError> {
        let stream = self.stream()?;
        let mut data = stream.put_with_stream(name)?;
        let mut buf = [0u8; TRANSFER_BUFFER_SIZE];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            data.write_all(&buf[..n])?;
        }
        stream.finalize_put_stream(data)?;
        Ok(())
    }

    /// Streams the remote file `name` from the current working directory
    /// into `writer`.
    pub(crate) fn retrieve(
        &mut self,
        name: &str,
        writer: &mut impl Write,
    ) -> Result<(), TransferError> {
        let stream = self.stream()?;
        let mut data = stream.retr_as_stream(name)?;
        let mut buf = [0u8; TRANSFER_BUFFER_SIZE];
        loop {
            let n = data.read(&mut buf)?;
            if n == 0 {
                break;
            }
            writer.write_all(&buf[..n])?;
        }
        stream.finalize_retr_stream(data)?;
        Ok(())
    }

    /// Raw LIST lines for the current working directory.
    pub(crate) fn list(&mut self) -> Result<Vec<String>, TransferError> {
        Ok(self.stream()?.list(None)?)
    }

    /// Logs out and releases the connection. Call on the success path;
    /// failure paths rely on the drop handler instead.
    pub(crate) fn quit(&mut self) -> Result<(), TransferError> {
        if let Some(mut stream) = self.stream.take() {
            stream.quit()?;
            debug!("session closed");
        }
        Ok(())
    }
}

impl Drop for TransferSession {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.quit() {
                warn!("error while releasing ftp connection: {}", e);
            }
        }
    }
}
