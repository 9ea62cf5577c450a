//! Watchit polls server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watchit_api::{AppState, router as api_router};
use watchit_common::{AppError, Config};
use watchit_core::{
    EventConfigService, PollConfigService, PollService, QuestionConfigService,
    directory_from_config,
};
use watchit_db::repositories::{
    EventConfigRepository, PollConfigRepository, PollRepository, QuestionConfigRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// Only Ctrl+C is available outside Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

fn build_state(db: &Arc<DatabaseConnection>, config: &Config) -> Result<AppState, AppError> {
    let directory = directory_from_config(&config.watchit)?;
    match &config.watchit.base_url {
        Some(url) => info!(%url, "Using upstream watchit directory"),
        None => info!(
            known = config.watchit.known_ids.len(),
            "No upstream watchit directory configured, using static ids"
        ),
    }

    let event_config_repo = EventConfigRepository::new(Arc::clone(db));
    let poll_config_repo = PollConfigRepository::new(Arc::clone(db));
    let question_config_repo = QuestionConfigRepository::new(Arc::clone(db));
    let poll_repo = PollRepository::new(Arc::clone(db));

    let event_config_service = EventConfigService::new(directory, event_config_repo);
    let poll_config_service =
        PollConfigService::new(event_config_service.clone(), poll_config_repo);
    let question_config_service =
        QuestionConfigService::new(event_config_service.clone(), question_config_repo);
    let poll_service = PollService::new(event_config_service.clone(), poll_repo);

    Ok(AppState {
        event_config_service,
        poll_config_service,
        question_config_service,
        poll_service,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchit=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting watchit-polls server...");

    let config = Config::load().context("Failed to load configuration")?;

    let db = watchit_db::init(&config.database)
        .await
        .context("Failed to connect to database")?;

    info!("Running database migrations...");
    watchit_db::migrate(&db)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations completed");

    let db = Arc::new(db);
    let state = build_state(&db, &config).context("Failed to build application state")?;

    let app = Router::new()
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server host or port")?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
