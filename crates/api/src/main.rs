use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use highcommand_api::background::collector::Collector;
use highcommand_api::config::{LogFormat, ServerConfig};
use highcommand_api::router::build_app_router;
use highcommand_api::state::AppState;
use highcommand_db::Store;
use highcommand_upstream::{Upstream, UpstreamClient};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        env = ?config.app_env,
        upstream = %config.upstream.base_url,
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = highcommand_db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    tracing::info!("Database connection pool created");

    highcommand_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    highcommand_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Upstream client ---
    let upstream: Arc<dyn Upstream> = Arc::new(
        UpstreamClient::new(&config.upstream).context("Failed to build upstream client")?,
    );

    // --- Collector ---
    let store = Store::new(pool.clone());
    let collector = Arc::new(Collector::new(
        upstream,
        store.clone(),
        config.scrape_interval,
    ));
    collector.start().await;

    // --- Router ---
    let state = AppState {
        store,
        collector: Arc::clone(&collector),
        live_fetch_timeout: config.live_fetch_timeout,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address {}", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, stopping collector");

    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(shutdown_timeout, collector.stop())
        .await
        .is_err()
    {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Collector did not stop in time",
        );
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "highcommand_api=info,highcommand_db=info,highcommand_upstream=info,tower_http=info".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
