//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use quote_engine::Orchestrator;
use quote_providers::{ClientBuildError, ExpandedClient, PrimaryClient};

use crate::config::ServerConfig;
use crate::routes::{self, AppState};

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: ServerConfig,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance with the given configuration
    ///
    /// Builds both provider clients up front so a bad TLS or connector setup
    /// fails at startup rather than on the first pricing request.
    pub fn new(config: ServerConfig) -> Result<Self, ClientBuildError> {
        let primary = Arc::new(PrimaryClient::new(config.primary_url.clone())?);
        let expanded = Arc::new(ExpandedClient::new(config.expanded_url.clone())?);
        let orchestrator = Arc::new(Orchestrator::with_options(
            primary,
            expanded,
            config.orchestrator_options(),
        ));

        let state = AppState::new(orchestrator, config.processor());
        let router = routes::build_router(state);

        Ok(Self { config, router })
    }

    /// Get the socket address the server will bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.config.socket_addr().parse()
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// This is the main entry point for starting the server.
    /// It binds to the configured host/port and serves requests.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Run the server with a specific listener
    ///
    /// This is useful for testing where you want to use a listener bound to port 0
    /// to get a random available port.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Create a test server and return the bound address
    ///
    /// This binds to port 0 to get a random available port, starts the server
    /// in a background task, and returns the actual bound address.
    #[cfg(test)]
    pub async fn spawn_test_server(
        config: ServerConfig,
    ) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = Self::new(config).unwrap();
        let handle = tokio::spawn(async move {
            server.run_with_listener(listener).await.ok();
        });

        // Give the server a moment to start
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        (addr, handle)
    }
}
