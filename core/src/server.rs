//! Share server — static-file host for exposing local files to the wall.
//!
//! Wall apps load their content over HTTP, so local images have to be
//! published somewhere the wall can reach. The share server copies files
//! into a scratch directory and serves that directory from a background
//! thread. It is fully decoupled from the Space/Section model.

use std::net::{SocketAddr, UdpSocket};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use axum::Router;
use tokio::sync::oneshot;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::error::WallError;

const DEFAULT_PORT: u16 = 8000;


struct Running {
    shutdown: oneshot::Sender<()>,
    thread: JoinHandle<()>,
}

pub struct ShareServer {
    address: String,
    tmp_dir: PathBuf,
    running: Option<Running>,
}

impl ShareServer {
    /// Create a share server rooted at `tmp_dir` (created when missing).
    /// Without an explicit `host:port` address, the machine's outbound IP
    /// and port 8000 are used so wall machines on the same network can
    /// reach the files.
    pub fn new(address: Option<String>, tmp_dir: &Path) -> Result<ShareServer, WallError> {
        let address = match address {
            Some(addr) => addr,
            None => format!("{}:{}", local_ip(), DEFAULT_PORT),
        };
        if !tmp_dir.exists() {
            std::fs::create_dir_all(tmp_dir)?;
            log::info!("created share directory {}", tmp_dir.display());
        }
        Ok(ShareServer {
            address,
            tmp_dir: tmp_dir.to_path_buf(),
            running: None,
        })
    }

    /// The address files are served from (`host:port`). After `start` this
    /// reflects the actually bound port, so port 0 may be used in tests.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Bind the listener and start serving the share directory on a
    /// background thread. Idempotent while running.
    pub fn start(&mut self) -> Result<(), WallError> {
        if self.running.is_some() {
            return Ok(());
        }

        let listener = std::net::TcpListener::bind(&self.address)?;
        listener.set_nonblocking(true)?;
        let bound: SocketAddr = listener.local_addr()?;
        if let Some((host, _)) = self.address.rsplit_once(':') {
            self.address = format!("{}:{}", host, bound.port());
        }

        let dir = self.tmp_dir.clone();
        let (shutdown, rx) = oneshot::channel::<()>();
        let thread = std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::warn!("share server runtime failed to start: {}", e);
                    return;
                }
            };
            runtime.block_on(async move {
                let listener = match tokio::net::TcpListener::from_std(listener) {
                    Ok(l) => l,
                    Err(e) => {
                        log::warn!("share server listener failed: {}", e);
                        return;
                    }
                };
                let app = Router::new().fallback_service(ServeDir::new(dir));
                let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                    let _ = rx.await;
                });
                if let Err(e) = serve.await {
                    log::warn!("share server stopped with error: {}", e);
                }
            });
        });

        log::info!("share server listening on {}", self.address);
        self.running = Some(Running { shutdown, thread });
        Ok(())
    }

    /// Shut the server down and join its thread. Optionally deletes the
    /// contents of the share directory.
    pub fn stop(&mut self, delete_files: bool) {
        if let Some(running) = self.running.take() {
            let _ = running.shutdown.send(());
            if running.thread.join().is_err() {
                log::warn!("share server thread panicked");
            }
        }
        if delete_files {
            self.clear_directory();
        }
    }

    /// Publish a local file: copy it into the share directory under a fresh
    /// token (extension preserved) and return its public URL.
    pub fn share_image(&self, image: &Path) -> Result<String, WallError> {
        if !image.exists() {
            return Err(WallError::MissingFile(image.to_path_buf()));
        }
        let token = Uuid::new_v4().to_string();
        let file_name = match image.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", token, ext),
            None => token,
        };
        std::fs::copy(image, self.tmp_dir.join(&file_name))?;
        Ok(self.build_url(&file_name))
    }

    /// Public URL of a file in the share directory.
    pub fn build_url(&self, name: &str) -> String {
        if self.address.starts_with("http") {
            format!("{}/{}", self.address, name)
        } else {
            format!("http://{}/{}", self.address, name)
        }
    }

    fn clear_directory(&self) {
        let entries = match std::fs::read_dir(&self.tmp_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("could not read share directory: {}", e);
                return;
            }
        };
        log::info!("deleting contents of {}", self.tmp_dir.display());
        for entry in entries.flatten() {
            if let Err(e) = std::fs::remove_file(entry.path()) {
                log::warn!("could not delete {}: {}", entry.path().display(), e);
            }
        }
    }
}

impl Drop for ShareServer {
    fn drop(&mut self) {
        self.stop(false);
    }
}


/// Outbound IP of this machine, discovered by a UDP connect probe (no
/// packets are sent). Falls back to the loopback address.
fn local_ip() -> String {
    let probe = || -> std::io::Result<String> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect("8.8.8.8:80")?;
        Ok(socket.local_addr()?.ip().to_string())
    };
    probe().unwrap_or_else(|_| "127.0.0.1".to_string())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
