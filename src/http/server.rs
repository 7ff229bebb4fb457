//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("Failed to serve on {addr}: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the listen address from `http.host` and `http.port`.
pub fn listen_addr(config: &AppConfig) -> Result<SocketAddr, ServerError> {
    format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .map_err(|e| {
            ServerError::Address(format!(
                "{}:{} ({})",
                config.http.host, config.http.port, e
            ))
        })
}

/// Start the HTTP server.
///
/// Blocks until the server has shut down. A bind failure is returned to the
/// caller rather than aborting here.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = listen_addr(config)?;
    let handle = Handle::new();

    shutdown::setup_shutdown_handler(handle.clone(), config.shutdown.grace_period());

    let listening = handle.clone();
    tokio::spawn(async move {
        if let Some(bound) = listening.listening().await {
            tracing::info!(addr = %bound, "Server up");
        }
    });

    tracing::info!(%addr, "Starting HTTP server");

    let counter = handle.clone();
    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|source| ServerError::Serve { addr, source })?;

    match ShutdownOutcome::from_open_connections(counter.connection_count()) {
        ShutdownOutcome::Drained => tracing::info!("Server exiting"),
        ShutdownOutcome::Forced { open_connections } => tracing::warn!(
            open_connections,
            "Server forced to shutdown, grace period expired with connections still open"
        ),
    }
    Ok(())
}

/// How the server stopped, judged by the connections still open once serving ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished within the grace period
    Drained,
    /// The grace period ran out and remaining connections were cut
    Forced { open_connections: usize },
}

impl ShutdownOutcome {
    pub fn from_open_connections(open_connections: usize) -> Self {
        if open_connections == 0 {
            ShutdownOutcome::Drained
        } else {
            ShutdownOutcome::Forced { open_connections }
        }
    }
}
