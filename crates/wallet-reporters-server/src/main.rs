mod config;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use wallet_reporters_api::{app_state, router};
use wallet_reporters_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_reporters=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.admin_key.is_none() {
        warn!("REPORTERS_ADMIN_KEY is unset; admin search will reject every request");
    }

    // Init database
    let db = Database::open(&config.db_path)?;

    let state = app_state(db, config.admin_key);
    let app = router(state).layer(TraceLayer::new_for_http());

    info!("Wallet reporters backend listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    ctrl_c.await.ok();
                    return;
                }
            };
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
