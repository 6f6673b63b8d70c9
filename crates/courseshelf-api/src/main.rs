use courseshelf_api::routes::build_router;
use courseshelf_api::state::AppState;
use courseshelf_core::Config;
use std::sync::Arc;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::new(config.clone()));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    tracing::info!(
        addr = %addr,
        storage_root = %config.storage_root.display(),
        upload_dir = %config.upload_dir.display(),
        max_upload_mb = config.max_upload_size_bytes / 1024 / 1024,
        entry_document = %config.entry_document,
        "Server ready and accepting connections"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courseshelf=debug,tower_http=debug".into()),
        )
        .with(console_fmt)
        .init();
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM signals to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }
}
