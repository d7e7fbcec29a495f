//! Keyward API server binary.
//!
//! Connects to PostgreSQL, applies migrations and serves the auth routes.

use std::sync::Arc;

use clap::Parser;
use keyward_api::config::ApiConfig;
use keyward_core::auth::AuthService;
use keyward_core::directory::PgDirectory;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "keyward_api_server", about = "Keyward authentication API server")]
struct Args {
    /// Address to listen on (overrides `BIND_ADDR`).
    #[arg(long)]
    bind_addr: Option<String>,

    /// PostgreSQL connection URL (overrides `DATABASE_URL`).
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(
                    "info,keyward_api=debug,keyward_core=debug",
                )
            })?,
        )
        .init();

    let args = Args::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!(
        bind_addr = %config.bind_addr,
        environment = %config.auth.environment,
        token_ttl_secs = config.auth.token_ttl_secs,
        "starting keyward_api_server"
    );

    info!(max_connections = args.max_connections, "configuring connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    keyward_api::migrate(&pool).await?;

    let directory = Arc::new(PgDirectory::new(pool));
    let state = keyward_api::AppState {
        auth: Arc::new(AuthService::from_config(directory, &config.auth)?),
        config: config.clone(),
    };

    let app = keyward_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutting down");
        })
        .await?;

    Ok(())
}
