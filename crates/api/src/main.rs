use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hamdash_api::config::{LogFormat, ServerConfig};
use hamdash_api::router::build_app_router;
use hamdash_api::state::AppState;
use hamdash_core::cards::producers::default_registry;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let log_format = LogFormat::from_env();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hamdash_api=debug,hamdash_core=debug,tower_http=debug".into()
            }),
        )
        .with((log_format == LogFormat::Json).then(|| tracing_subscriber::fmt::layer().json()))
        .with((log_format == LogFormat::Pretty).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Card registry ---
    let registry = default_registry();
    tracing::info!(
        producers = registry.producer_count(),
        help_sections = registry.help_sections().len(),
        "Card registry built"
    );

    // --- App state and router ---
    let state = AppState::new(config.clone(), registry);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let drain_started = Arc::new(Notify::new());
    let notify = Arc::clone(&drain_started);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                notify.notify_one();
            })
            .await
    });

    tokio::select! {
        result = &mut server => report_server_exit(result),
        () = drain_started.notified() => {
            let drain = Duration::from_secs(config.shutdown_timeout_secs);
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => report_server_exit(result),
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = config.shutdown_timeout_secs,
                        "In-flight requests did not drain in time, forcing shutdown"
                    );
                    server.abort();
                }
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

fn report_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Server error"),
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
