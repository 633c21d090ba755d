// ABOUTME: HTTP server bootstrap binding the router to the configured address
// ABOUTME: Initializes the shared HTTP client and shuts down gracefully on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::resources::ServerResources;
use crate::routes::build_router;
use anyhow::{Context, Result};
use gateway_providers::http_client::initialize_shared_client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// Gateway HTTP server
pub struct GatewayServer {
    resources: Arc<ServerResources>,
}

impl GatewayServer {
    /// Server over prepared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Server backed by the real Garmin connector
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        initialize_shared_client(
            config.http_client.timeout_secs,
            config.http_client.connect_timeout_secs,
        );
        Self::new(Arc::new(ServerResources::new(config)))
    }

    /// Bind and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the port cannot be bound
    /// or the server fails while running
    pub async fn run(self) -> Result<()> {
        let config = Arc::clone(&self.resources.config);
        let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", config.host, config.http_port))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        info!(%addr, "Garmin gateway listening");

        let app = build_router(self.resources);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Garmin gateway stopped gracefully");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully..."),
        () = terminate => info!("Received SIGTERM, shutting down gracefully..."),
    }
}
