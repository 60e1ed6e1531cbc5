//! Example application served behind the directory middleware.
//!
//! ```text
//!  Client ──▶ request ID ──▶ trace ──▶ timeout ──▶ autodir ──┬──▶ app routes
//!                                                   │        │
//!                                                   │        └──▶ RouteRegistry
//!                                                   ├── listing  {"dir":[...]}
//!                                                   └── 404      Not found
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use autodir::config::loader::{apply_port_override, load_config, PORT_ENV};
use autodir::config::watcher::ConfigWatcher;
use autodir::config::AppConfig;
use autodir::observability::{logging, metrics};
use autodir::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "autodir")]
#[command(about = "Serve an example app with browsable route directories", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload listing settings when the configuration file changes.
    #[arg(short, long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    apply_port_override(&mut config, std::env::var(PORT_ENV).ok().as_deref());

    logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "autodir starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        excluded_prefixes = ?config.autodir.excluded_prefixes,
        index_policy = ?config.autodir.index_policy,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher handle alive for the lifetime of the server
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => (None, mpsc::unbounded_channel().1),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
