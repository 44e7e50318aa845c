use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::AppState;
use crate::{api, pages};

/// Build the full application router: pages, API, static assets and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    // A disabled timeout is a very long one, so the layer stack keeps one type.
    let timeout_duration = if config.limits.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60) // 1 year
    } else {
        Duration::from_secs(config.limits.request_timeout_secs)
    };

    Router::new()
        .merge(pages::router())
        .merge(api::router())
        .nest_service("/static", ServeDir::new(&config.server.static_dir))
        .fallback(pages::not_found)
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let config = state.config.clone();

    if config.uses_default_secret() {
        warn!(
            name: "security.default_secret",
            "Using the built-in JWT secret; set FMS_SECRET_KEY or security.jwt_secret"
        );
    }

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(name: "server.signal.failed", error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
