use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipboard_rooms::{
    build_router, AppConfig, AppState, InMemoryRoomStore, PostgresRoomStore, RoomService,
    RoomStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipboard_rooms=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clipboard room server");

    let config = AppConfig::from_env()?;

    // Rooms persist in PostgreSQL when DATABASE_URL is set, otherwise in memory
    let room_store: Arc<dyn RoomStore + Send + Sync> = match &config.database_url {
        Some(database_url) => {
            info!("Using PostgreSQL room store");
            Arc::new(
                PostgresRoomStore::connect(database_url, config.database_max_connections)
                    .await
                    .context("failed to connect to database")?,
            )
        }
        None => {
            warn!("DATABASE_URL not set, rooms will be kept in memory only");
            Arc::new(InMemoryRoomStore::new())
        }
    };
    room_store
        .open()
        .await
        .context("failed to open room store")?;

    let room_service = RoomService::new(room_store.clone(), config.password_hasher()?)
        .with_settings(config.room_settings());
    let app = build_router(AppState::new(Arc::new(room_service)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!("Server running on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutting down, closing room store");
    room_store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl-C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
