mod error;
mod routes;
mod storage;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{delete, get, post, put},
    Router,
};
use std::path::PathBuf;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use storage::Db;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: AppConfig,
}

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub training_endpoints: bool,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffhub_server=info,tower_http=info".into()),
        )
        .init();

    // Data directory
    let data_dir = std::env::var("STAFFHUB_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));

    tracing::info!("data directory: {}", data_dir.display());

    // Initialize database
    let db = storage::init_db(&data_dir)?;
    tracing::info!("database initialized");

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
    if jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET not set — authenticated routes will be unavailable");
    }

    let training_endpoints = std::env::var("STAFFHUB_TRAINING_ENDPOINTS")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if training_endpoints {
        tracing::warn!(
            "training endpoints ENABLED — /api/system/* is deliberately vulnerable, \
             use only in a contained environment"
        );
    }

    let config = AppConfig {
        jwt_secret,
        training_endpoints,
    };

    let uploads_dir = db.uploads_dir();
    std::fs::create_dir_all(&uploads_dir)?;

    let state = AppState { db, config };

    // Build API routes
    let api = Router::new()
        // Health
        .route("/health", get(routes::health::health))
        // Auth
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route("/auth/verify", post(routes::auth::verify))
        .route("/auth/me", get(routes::auth::me))
        .route("/auth/logout", post(routes::auth::logout))
        // Employees
        .route(
            "/employees",
            get(routes::employees::list).post(routes::employees::create),
        )
        .route("/employees/bulk-upload", post(routes::employees::bulk_upload))
        .route(
            "/employees/{id}",
            get(routes::employees::get)
                .put(routes::employees::update)
                .delete(routes::employees::delete),
        )
        // Documents
        .route("/documents", get(routes::documents::list))
        .route("/documents/upload", post(routes::documents::upload))
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024)) // 50MB uploads
        .route(
            "/documents/{id}",
            get(routes::documents::get).delete(routes::documents::delete),
        )
        // Calendar
        .route(
            "/calendar-events",
            get(routes::calendar::list).post(routes::calendar::create),
        )
        .route(
            "/calendar-events/{id}",
            put(routes::calendar::update).delete(routes::calendar::delete),
        )
        .route("/reset-calendar-events", post(routes::calendar::reset))
        // Bank accounts
        .route(
            "/bank-accounts",
            get(routes::bank_accounts::list).post(routes::bank_accounts::create),
        )
        .route(
            "/bank-accounts/{id}",
            put(routes::bank_accounts::update).delete(routes::bank_accounts::delete),
        )
        // Performance goals
        .route(
            "/performance/goals",
            get(routes::performance::list).post(routes::performance::create),
        )
        .route(
            "/performance/goals/{id}",
            put(routes::performance::update).delete(routes::performance::delete),
        )
        // Notifications
        .route(
            "/notifications",
            get(routes::notifications::list).post(routes::notifications::create),
        )
        .route(
            "/notifications/read-all",
            put(routes::notifications::mark_all_read),
        )
        .route("/notifications/{id}/read", put(routes::notifications::mark_read))
        .route("/notifications/{id}", delete(routes::notifications::delete))
        // System (training endpoints; 404 unless explicitly enabled)
        .route("/system/fetch-resource", post(routes::system::fetch_resource));

    // Build main router
    let mut app = Router::new()
        .nest("/api", api)
        // Uploaded documents are public static files
        .nest_service("/uploads", ServeDir::new(&uploads_dir));

    // Serve the SPA build if present
    let web_dir = std::env::var("STAFFHUB_WEB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("web/build"));
    if web_dir.exists() {
        tracing::info!("serving static files from {}", web_dir.display());
        let index_html = web_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(&web_dir).fallback(ServeFile::new(index_html)));
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        // The request origin is mirrored back with credentials allowed,
        // matching the permissive posture of the original portal.
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        )
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    tracing::info!("starting server on port {port}");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
