//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// Directory GET targets are resolved against.
    pub content_root: PathBuf,
    /// Where uploads are written. Every upload overwrites this one file.
    pub upload_path: PathBuf,
    /// Starting capacity of the per-request buffer; doubled on overflow.
    pub initial_buffer_size: usize,
    /// Bytes requested from the socket per read call.
    pub read_chunk_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            content_root: PathBuf::from("."),
            upload_path: PathBuf::from("upload.jpg"),
            initial_buffer_size: 8000,
            read_chunk_size: 1024,
        }
    }
}
