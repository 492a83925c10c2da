use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bulk_ingest_server::{build_router, Dependencies, ServerConfig, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let deps = Dependencies::new(&config).await?;
    let app = build_router(deps.handler, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, indexes = ?deps.registry.names(), "Bulk ingest server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Bulk ingest server stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` filters (default `info`) and
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).compact().init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
