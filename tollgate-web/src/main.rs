//! Tollgate Web Server
//!
//! Serves the login, user management and role-protected endpoints.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tollgate_core::{init_logging, TollgateConfig};
use tollgate_web::TollgateServerBuilder;
use tracing::info;

/// Tollgate Web Server - token sessions and role-ranked access control
#[derive(Parser)]
#[command(name = "tollgate-web")]
#[command(about = "Token-based authentication and role authorization server")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "TOLLGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<TollgateConfig> {
        let mut config = match &self.config {
            Some(path) => TollgateConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => TollgateConfig::default(),
        };

        // Override with command line arguments
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = args.load_config()?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Server: http://{}", config.server.address());
    if config.bootstrap.admin_password == "admin" {
        tracing::warn!("Administrator uses the default password, change it after first login");
    }

    let server = TollgateServerBuilder::new()
        .config(config)
        .build()
        .context("Failed to build server")?;

    server.start().await.context("Server failed")?;

    info!("Server shut down gracefully");
    Ok(())
}
