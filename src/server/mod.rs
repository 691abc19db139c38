mod cors;
pub mod handlers;
mod types;

pub use cors::cors_layer;
pub use handlers::{AppState, LIVE_STATUS};
pub use types::*;

use crate::{Result, config::{Config, CorsConfig}, model};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the HTTP routes around an already-loaded model.
pub fn router(state: AppState, cors: &CorsConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors)?))
}

pub async fn run(config: Config) -> Result<()> {
    // The service never serves without a model
    let predictor = model::load(&config.model.path).await?;

    let app_state = AppState { predictor };
    let app = router(app_state, &config.server.cors)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received, stopping server gracefully");
}
