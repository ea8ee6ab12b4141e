//! Tollgate Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebError, WebResult};
use axum::serve;
use tokio::net::TcpListener;
use tollgate_core::TollgateConfig;
use tracing::{error, info};

/// Main Tollgate web server
pub struct TollgateServer {
    state: AppState,
}

impl TollgateServer {
    /// Create a new Tollgate server
    pub fn new(config: TollgateConfig) -> WebResult<Self> {
        let state = AppState::new(config)?;
        Ok(Self { state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.state.config.server.address();
        info!("Starting Tollgate web server");

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);
        info!(
            "Tokens expire after {}s without use",
            self.state.config.security.authentication_timeout_secs
        );

        if let Err(e) = serve(listener, app).await {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &TollgateConfig {
        &self.state.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Builder for TollgateServer
pub struct TollgateServerBuilder {
    config: TollgateConfig,
}

impl TollgateServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: TollgateConfig::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn config(mut self, config: TollgateConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<TollgateServer> {
        TollgateServer::new(self.config)
    }
}

impl Default for TollgateServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
