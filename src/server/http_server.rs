//! Connection supervisor.
//!
//! Accepts connections and hands each one to its own task. Finished tasks
//! are reaped from the same `select!` loop that accepts, so the set of
//! tracked tasks only holds connections still in flight.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{self, Duration};

use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::handle_request;
use crate::server::reader::read_request;

/// How long in-flight connections get to finish once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Pause after a failed accept before trying again.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// An HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Forward Ctrl+C to the shutdown channel.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        })
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let ctrl_c = Self::setup_ctrl_c_handler(shutdown_tx);

        let result = self.serve(listener, shutdown_rx).await;
        ctrl_c.abort();
        result
    }

    /// Accept connections on `listener` until a message arrives on `shutdown_rx`.
    pub async fn serve(
        &self,
        listener: TcpListener,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) -> Result<(), Error> {
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                Some(()) = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => self.spawn_worker(socket, addr, &mut tasks),
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }

                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::reap(joined);
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;
        Ok(())
    }

    /// Hand a freshly accepted connection to its own task.
    fn spawn_worker(&self, mut socket: TcpStream, addr: SocketAddr, tasks: &mut JoinSet<()>) {
        info!("Connection from: {addr}");
        let config = self.config.clone();

        tasks.spawn(async move {
            if let Err(e) = Self::handle_connection(&mut socket, &config).await {
                match e.status() {
                    Some(status) => warn!("{addr}: answered {} ({e})", status.as_u16()),
                    None => error!("{addr}: connection aborted: {e}"),
                }
            }
            let _ = socket.shutdown().await;
            debug!("Closed connection from {addr}");
        });
    }

    fn reap(joined: Result<(), JoinError>) {
        if let Err(e) = joined {
            error!("Connection task failed: {e}");
        }
    }

    /// Log a failed accept. Interrupted accepts are retried straight away.
    async fn handle_accept_error(e: std::io::Error) {
        if e.kind() == std::io::ErrorKind::Interrupted {
            debug!("Accept interrupted, retrying");
            return;
        }

        error!("Error accepting connection: {e}");
        time::sleep(ACCEPT_RETRY_DELAY).await;
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let drained = time::timeout(SHUTDOWN_GRACE, async {
            while let Some(joined) = tasks.join_next().await {
                Self::reap(joined);
            }
        })
        .await;

        if drained.is_err() {
            warn!("Aborting {len} connections still open", len = tasks.len());
            tasks.shutdown().await;
        }
        info!("Server shutdown complete");
    }

    /// Handle a single connection: read one request, answer it.
    ///
    /// Failures that map to a status are answered before the error is
    /// returned. Buffer-growth and connection I/O failures are returned
    /// without writing anything.
    pub async fn handle_connection<S>(socket: &mut S, config: &ServerConfig) -> Result<(), Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let buffer = read_request(socket, config.initial_buffer_size, config.read_chunk_size).await?;
        if buffer.is_empty() {
            debug!("Connection closed before any request bytes arrived");
            return Ok(());
        }

        match handle_request(socket, &buffer, config).await {
            Ok(response) => {
                socket.write_all(&response.to_bytes()).await?;
                socket.flush().await?;
                Ok(())
            }
            Err(e) => {
                if let Some(response) = e.to_response() {
                    socket.write_all(&response.to_bytes()).await?;
                    socket.flush().await?;
                }
                Err(e)
            }
        }
    }
}
