//! library-server - HTTP backend for the personal library tracker
//!
//! Loads configuration, runs migrations and serves the REST API.

mod config;

use anyhow::Result;
use axum::Router;
use clap::Parser;
use config::{AppConfig, LogFormat, LoggingConfig};
use library_service::LibraryServiceModule;
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "library-server", version, about = "Personal library tracker server")]
struct Cli {
    /// YAML configuration file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config/library.yaml")]
    config: PathBuf,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    if cli.print_config {
        print!("{}", serde_yaml::to_string(&cfg)?);
        return Ok(());
    }

    init_tracing(&cfg.logging)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "Starting library-server"
    );

    let mut options = ConnectOptions::new(cfg.database.url.clone());
    options
        .max_connections(cfg.database.max_connections)
        .sqlx_logging(false);
    let db = match Database::connect(options).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let module = LibraryServiceModule::new(cfg.library.clone());
    module.migrate(&db).await?;
    if cli.migrate_only {
        info!("Migrations applied, exiting");
        return Ok(());
    }

    module.init(db)?;
    let app = build_app(&module, &cfg)?;

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr).await?;
    info!("library-server listening on http://{}", cfg.server.bind_addr);
    info!("Health check: http://{}/health", cfg.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("library-server stopped");
    Ok(())
}

fn build_app(module: &LibraryServiceModule, cfg: &AppConfig) -> Result<Router> {
    let mut app = module
        .register_rest(Router::new())?
        .layer(TraceLayer::new_for_http());
    if cfg.server.cors_allow_any_origin {
        app = app.layer(CorsLayer::permissive());
    }
    Ok(app)
}

fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cfg.level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match cfg.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
