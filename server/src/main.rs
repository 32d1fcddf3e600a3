//! featreg registry server
//!
//! Serves the spec service over HTTP/JSON, backed by a SQLite registry file
//! or, with `--in-memory`, by a registry that lives only as long as the
//! process.
//!
//! Usage:
//!   featreg-server --port 6565 --database registry.db

use std::{path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::Parser;
use featreg_model::{Source, DEFAULT_PROJECT_NAME};
use featreg_server::build_router;
use featreg_service::{SpecService, SpecServiceConfig, DEFAULT_SOURCE_BROKERS, DEFAULT_SOURCE_TOPIC};
use featreg_storage::{MemoryRegistry, SqliteRegistry};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "featreg-server")]
#[command(about = "Feature set registry server")]
struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "6565")]
    port: u16,

    /// Path to the SQLite registry database
    #[arg(short, long, default_value = "featreg.db")]
    database: PathBuf,

    /// Keep the registry in memory instead of on disk
    #[arg(long)]
    in_memory: bool,

    /// Project used when a request leaves the project empty
    #[arg(long, default_value = DEFAULT_PROJECT_NAME)]
    default_project: String,

    /// Kafka brokers given to feature sets applied without a source
    #[arg(long, default_value = DEFAULT_SOURCE_BROKERS)]
    default_source_brokers: String,

    /// Kafka topic given to feature sets applied without a source
    #[arg(long, default_value = DEFAULT_SOURCE_TOPIC)]
    default_source_topic: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("featreg server starting...");
    let config = SpecServiceConfig {
        default_project: args.default_project.clone(),
        default_source: Source::kafka(&args.default_source_brokers, &args.default_source_topic),
    };

    let service = if args.in_memory {
        info!("Using in-memory registry");
        SpecService::with_registry(Arc::new(MemoryRegistry::new()), config)
    } else {
        let registry = SqliteRegistry::open(&args.database)
            .with_context(|| format!("Failed to open registry at {:?}", args.database))?;
        info!("Using registry database {:?}", args.database);
        SpecService::with_registry(Arc::new(registry), config)
    };

    let app = build_router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", args.port))?;
    info!(
        "Listening on port {} (default project {:?})",
        args.port, args.default_project
    );

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
