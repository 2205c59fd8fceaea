use std::any::Any;

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, ApiError, AppState};
use crate::config::WeatherProxyConfig;
use crate::upstream::WeatherApiClient;
use crate::{Result, WeatherProxyError};

pub const SERVICE_NAME: &str = "MCP Weather Server";

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: String,
    pub service: String,
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api::router())
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &WeatherProxyConfig) -> Result<()> {
    let client = WeatherApiClient::new(&config.upstream)?;
    tracing::info!(upstream = client.base_url(), "Using NWS API");

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        "Web server running at http://localhost:{}",
        config.server.port
    );

    axum::serve(listener, app(AppState::new(client)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WeatherProxyError::server(e.to_string()))?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

async fn not_found() -> Response {
    ApiError::not_found("Not found", None).into_response()
}

/// Turn a handler panic into the standard 500 envelope
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        Some(message.clone())
    } else {
        err.downcast_ref::<&str>().map(|message| (*message).to_string())
    };

    tracing::error!(
        details = details.as_deref().unwrap_or("Unknown error"),
        "Handler panicked"
    );
    ApiError::internal(details).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
