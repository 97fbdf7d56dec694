//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::time::Duration;

use crate::core::{Result, ServerError, ServerState};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    /// Serve an already initialized state; its config supplies bind address and timeouts
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Serve until Ctrl+C / SIGTERM, then drain and close the store
    pub async fn run(self) -> Result<()> {
        let state = self.state;
        let config = state.config.clone();

        let app = build_app(&state);
        let addr = config.bind_addr();

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        let grace = Duration::from_millis(config.shutdown_timeout_ms);
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        tracing::info!(addr = %addr, environment = %config.environment, "Directory server listening");

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        state.db.close().await;
        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Graceful shutdown handler
///
/// Listens for SIGTERM and Ctrl+C signals
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use std::net::{IpAddr, Ipv4Addr, TcpListener};

    #[tokio::test]
    async fn test_run_reports_port_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let mut config = Config::in_memory();
        config.http_host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.http_port = port;
        let state = ServerState::initialize(&config).await.unwrap();

        let err = Server::new(state).run().await.unwrap_err();
        match err {
            ServerError::Bind { addr, .. } => assert_eq!(addr.port(), port),
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}
