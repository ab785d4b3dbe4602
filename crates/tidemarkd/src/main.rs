//! tidemarkd — the Tidemark daemon.
//!
//! Single binary that assembles the Tidemark subsystems:
//! - Config store (redb)
//! - Tenant directory + status event broadcast
//! - Sub-resource registry
//! - REST API
//!
//! # Usage
//!
//! ```text
//! tidemarkd serve --port 8620 --data-dir /var/lib/tidemark
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use tidemark_core::ServerConfig;
use tidemark_registry::ResourceRegistry;
use tidemark_store::ConfigStore;
use tidemark_tenant::{BroadcastSink, TenantDirectory};

#[derive(Parser)]
#[command(name = "tidemarkd", about = "Tidemark configuration store daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for persistent state (overrides the config file).
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path to a tidemark.toml configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            data_dir,
            config,
        } => serve(port, data_dir, config).await,
    }
}

async fn serve(
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let file_config = match &config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    // Initialize tracing. RUST_LOG wins over the config file filter.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(file_config.log_filter())),
        )
        .init();

    info!("Tidemark daemon starting");

    let port = port.unwrap_or_else(|| file_config.port());
    let data_dir = data_dir.unwrap_or_else(|| file_config.data_dir());

    // Ensure data directory exists.
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("tidemark.redb");

    // ── Initialize subsystems ──────────────────────────────────

    let store = ConfigStore::open(&db_path)?;
    info!(path = ?db_path, "config store opened");

    let events = Arc::new(BroadcastSink::new(64));
    let tenants = TenantDirectory::new(store.clone(), events.clone());
    let registry = ResourceRegistry::new(store);
    info!("tenant directory and resource registry initialized");

    // Log tenant status events as they are published.
    let mut event_rx = events.subscribe();
    let event_log = tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => info!(
                    tenant_id = %event.tenant_id,
                    kind = ?event.kind,
                    name = %event.name,
                    region = %event.region,
                    "tenant status event"
                ),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    // ── Start API server ───────────────────────────────────────

    let router = tidemark_api::build_router(registry, tenants);
    let addr: SocketAddr = format!("{}:{}", file_config.bind(), port).parse()?;

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    event_log.abort();
    info!("Tidemark daemon stopped");
    Ok(())
}
