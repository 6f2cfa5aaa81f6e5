use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailstub_api::config::{LogFormat, ServerConfig};
use mailstub_api::router::build_app_router;
use mailstub_api::state::AppState;
use mailstub_db::SqliteStore;

/// Local email testing server: catches messages sent by your application and
/// shows them per project and mailbox.
#[derive(Debug, Parser)]
#[command(name = "mailstub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the API server.
    Start {
        /// Port to listen on (overrides PORT).
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,

        /// Address to bind (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// SQLite database file (overrides MAILSTUB_DB_PATH).
        #[arg(long)]
        db: Option<PathBuf>,

        /// Built frontend to serve on non-API paths (overrides
        /// MAILSTUB_STATIC_DIR).
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = ServerConfig::from_env().context("Invalid configuration")?;
    match cli.command {
        Commands::Start {
            port,
            host,
            db,
            static_dir,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(db) = db {
                config.database_path = db;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }
        }
    }

    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database_path.display(),
        "Loaded server configuration"
    );

    // --- Database ---
    if let Some(dir) = config.database_path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    }

    let pool = mailstub_db::create_pool(&config.database_path)
        .await
        .context("Failed to open database")?;
    tracing::info!("Database connection pool created");

    mailstub_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    mailstub_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Router ---
    let config = Arc::new(config);
    let state = AppState {
        store: Arc::new(SqliteStore::new(pool.clone())),
        config: Arc::clone(&config),
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("Listener has no local address")?;
    tracing::info!(%addr, "MailStub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mailstub_api=debug,mailstub_db=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
