//! Scripted in-process FTP server for integration tests.
//!
//! Speaks just enough of the control protocol (plus PASV data
//! connections) to drive the client through login, navigation, store,
//! retrieve and listing, and records everything for assertions: commands
//! received, connections accepted, QUITs answered, and the virtual
//! directory/file tree.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use rusty_ftp::ConnectionConfig;

#[derive(Default)]
pub struct ServerState {
    /// Every control command received, across all connections.
    pub commands: Vec<String>,
    /// Control connections accepted so far.
    pub connections: usize,
    /// QUITs answered.
    pub quits: usize,
    /// Existing absolute directories.
    pub dirs: BTreeSet<String>,
    /// Stored files, absolute path -> contents.
    pub files: BTreeMap<String, Vec<u8>>,
    /// Respond 530 to PASS when set.
    pub reject_login: bool,
    /// Respond 550 to STOR when set.
    pub reject_stor: bool,
}

pub struct MockFtpServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MockFtpServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(ServerState::default()));
        state.lock().unwrap().dirs.insert("/".to_string());
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let state = Arc::clone(&state);
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                for conn in listener.incoming() {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    let Ok(conn) = conn else { break };
                    state.lock().unwrap().connections += 1;
                    // Per-connection I/O errors are irrelevant to the
                    // tests; assertions run against the recorded state.
                    let _ = serve_control(conn, &state);
                }
            })
        };

        Self {
            addr,
            state,
            stop,
            handle: Some(handle),
        }
    }

    /// Connection settings pointing at this server.
    pub fn config(&self, base_path: &str) -> ConnectionConfig {
        ConnectionConfig {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
            username: "tester".to_string(),
            password: "hunter2".to_string(),
            base_path: base_path.to_string(),
            file_path: "/2015/01/01".to_string(),
        }
    }

    pub fn add_dir(&self, path: &str) {
        self.state.lock().unwrap().dirs.insert(path.to_string());
    }

    pub fn add_file(&self, path: &str, contents: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_string(), contents.to_vec());
    }

    pub fn reject_login(&self) {
        self.state.lock().unwrap().reject_login = true;
    }

    pub fn reject_stor(&self) {
        self.state.lock().unwrap().reject_stor = true;
    }

    pub fn state(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap()
    }
}

impl Drop for MockFtpServer {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        // Unblock the accept loop so the thread can observe the flag.
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve_control(conn: TcpStream, state: &Arc<Mutex<ServerState>>) -> std::io::Result<()> {
    conn.set_read_timeout(Some(Duration::from_secs(10)))?;
    let mut reader = BufReader::new(conn.try_clone()?);
    let mut conn = conn;
    let mut cwd = String::from("/");
    let mut data_listener: Option<TcpListener> = None;

    conn.write_all(b"220 mock ftp ready\r\n")?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            // Client tore the socket down without QUIT.
            return Ok(());
        }
        let trimmed = line.trim_end();
        state.lock().unwrap().commands.push(trimmed.to_string());
        let (verb, arg) = match trimmed.split_once(' ') {
            Some((v, a)) => (v.to_ascii_uppercase(), a.to_string()),
            None => (trimmed.to_ascii_uppercase(), String::new()),
        };

        match verb.as_str() {
            "USER" => conn.write_all(b"331 password required\r\n")?,
            "PASS" => {
                if state.lock().unwrap().reject_login {
                    conn.write_all(b"530 login incorrect\r\n")?;
                } else {
                    conn.write_all(b"230 logged in\r\n")?;
                }
            }
            "TYPE" => conn.write_all(b"200 type set\r\n")?,
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0")?;
                let port = listener.local_addr()?.port();
                let reply = format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{})\r\n",
                    port / 256,
                    port % 256
                );
                data_listener = Some(listener);
                conn.write_all(reply.as_bytes())?;
            }
            "CWD" => {
                let target = resolve(&cwd, &arg);
                if state.lock().unwrap().dirs.contains(&target) {
                    cwd = target;
                    conn.write_all(b"250 directory changed\r\n")?;
                } else {
                    conn.write_all(b"550 no such directory\r\n")?;
                }
            }
            "MKD" => {
                let target = resolve(&cwd, &arg);
                state.lock().unwrap().dirs.insert(target.clone());
                conn.write_all(format!("257 \"{target}\" created\r\n").as_bytes())?;
            }
            "STOR" => {
                if state.lock().unwrap().reject_stor {
                    conn.write_all(b"550 permission denied\r\n")?;
                    continue;
                }
                let Some(listener) = data_listener.take() else {
                    conn.write_all(b"425 use PASV first\r\n")?;
                    continue;
                };
                conn.write_all(b"150 opening data connection\r\n")?;
                let (mut data, _) = listener.accept()?;
                let mut contents = Vec::new();
                data.read_to_end(&mut contents)?;
                drop(data);
                let target = resolve(&cwd, &arg);
                state.lock().unwrap().files.insert(target, contents);
                conn.write_all(b"226 transfer complete\r\n")?;
            }
            "RETR" => {
                let target = resolve(&cwd, &arg);
                let contents = state.lock().unwrap().files.get(&target).cloned();
                let Some(contents) = contents else {
                    conn.write_all(b"550 no such file\r\n")?;
                    continue;
                };
                let Some(listener) = data_listener.take() else {
                    conn.write_all(b"425 use PASV first\r\n")?;
                    continue;
                };
                conn.write_all(b"150 opening data connection\r\n")?;
                let (mut data, _) = listener.accept()?;
                data.write_all(&contents)?;
                drop(data);
                conn.write_all(b"226 transfer complete\r\n")?;
            }
            "LIST" | "NLST" => {
                let Some(listener) = data_listener.take() else {
                    conn.write_all(b"425 use PASV first\r\n")?;
                    continue;
                };
                conn.write_all(b"150 opening data connection\r\n")?;
                let listing = render_listing(&state.lock().unwrap(), &cwd);
                let (mut data, _) = listener.accept()?;
                data.write_all(listing.as_bytes())?;
                drop(data);
                conn.write_all(b"226 transfer complete\r\n")?;
            }
            "QUIT" => {
                state.lock().unwrap().quits += 1;
                conn.write_all(b"221 goodbye\r\n")?;
                return Ok(());
            }
            _ => conn.write_all(b"502 command not implemented\r\n")?,
        }
    }
}

fn resolve(cwd: &str, arg: &str) -> String {
    if arg.starts_with('/') {
        arg.to_string()
    } else if cwd == "/" {
        format!("/{arg}")
    } else {
        format!("{cwd}/{arg}")
    }
}

/// Unix-style LIST output for the direct children of `cwd`.
fn render_listing(state: &ServerState, cwd: &str) -> String {
    let prefix = if cwd == "/" {
        "/".to_string()
    } else {
        format!("{cwd}/")
    };
    let mut out = String::new();
    for dir in &state.dirs {
        if let Some(name) = dir.strip_prefix(&prefix) {
            if !name.is_empty() && !name.contains('/') {
                out.push_str(&format!(
                    "drwxr-xr-x   2 ftp      ftp          4096 Jan 01 12:00 {name}\r\n"
                ));
            }
        }
    }
    for (path, contents) in &state.files {
        if let Some(name) = path.strip_prefix(&prefix) {
            if !name.contains('/') {
                out.push_str(&format!(
                    "-rw-r--r--   1 ftp      ftp      {:>8} Jan 01 12:00 {name}\r\n",
                    contents.len()
                ));
            }
        }
    }
    out
}
