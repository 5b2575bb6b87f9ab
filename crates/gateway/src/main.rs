mod mock;
mod proxy;
mod rules;

use axum::{routing::any, Router};
use std::path::PathBuf;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared proxy state: the outbound HTTP client and the backend base URL.
#[derive(Clone)]
pub struct GatewayState {
    pub client: reqwest::Client,
    pub backend_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffhub_gateway=info,tower_http=info".into()),
        )
        .init();

    let backend_url = std::env::var("BACKEND_URL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "http://localhost:3000".into());
    let backend_url = backend_url.trim_end_matches('/').to_string();
    tracing::info!("proxying /api to {backend_url}");

    // No client-wide timeout: only the routes that declare one in the
    // rule table race against the clock.
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()?;

    let state = GatewayState {
        client,
        backend_url,
    };

    let mut app = Router::new()
        .route("/api/{*path}", any(proxy::dispatch))
        .with_state(state);

    // Serve the SPA build; any unmatched path gets index.html so
    // client-side routing can take over.
    let web_dir = std::env::var("STAFFHUB_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("web/build"));
    if web_dir.exists() {
        tracing::info!("serving static files from {}", web_dir.display());
        let index_html = web_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(&web_dir).fallback(ServeFile::new(index_html)));
    } else {
        tracing::warn!("web dir {} not found — serving API proxy only", web_dir.display());
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        // Same permissive posture as the backend: mirror the request
        // origin with credentials allowed.
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        );

    let port = std::env::var("FRONTEND_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8080".into());
    tracing::info!("starting gateway on port {port}");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
