//! HTTP server for the trivia service
//!
//! The pages under `trivia/static/` are compiled into the binary. `/` serves
//! `default.html`, `/static/*` serves the named asset, and any other path
//! without a route falls through to the assets and 404s when none matches.
//! Setting `assets.static_dir` serves an on-disk directory instead.

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::{get, get_service},
    Router,
};
use rust_embed::RustEmbed;
use std::{future::Future, net::SocketAddr, path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use refdata_core::{
    core::{AppState, ConfiguredAppState, HealthResponse},
    log_info,
    storage::StorageImpl,
    Question, Result,
};

use crate::questions;

/// Page served at `/`
pub const DEFAULT_PAGE: &str = "default.html";

/// Bundled page set
#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

/// `GET /api/questions`
pub async fn list_questions<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Question>>> {
    Ok(Json(questions::list_questions(app_state.store()).await?))
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
}

fn embedded_asset(path: &str) -> Response {
    match Assets::get(path) {
        Some(file) => {
            let mime = file.metadata.mimetype().to_string();
            ([(CONTENT_TYPE, mime)], file.data).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn embedded_default_page() -> Response {
    embedded_asset(DEFAULT_PAGE)
}

async fn embedded_static(Path(path): Path<String>) -> Response {
    embedded_asset(&path)
}

async fn embedded_fallback(uri: Uri) -> Response {
    embedded_asset(uri.path().trim_start_matches('/'))
}

fn bundled_assets<S: StorageImpl>(router: Router<Arc<AppState<S>>>) -> Router<Arc<AppState<S>>> {
    router
        .route("/", get(embedded_default_page))
        // Pages reference their assets under /static
        .route("/static/{*path}", get(embedded_static))
        .fallback(embedded_fallback)
}

fn directory_assets<S: StorageImpl>(
    router: Router<Arc<AppState<S>>>,
    static_dir: PathBuf,
) -> Router<Arc<AppState<S>>> {
    router
        .route("/", get_service(ServeFile::new(static_dir.join(DEFAULT_PAGE))))
        .nest_service("/static", ServeDir::new(&static_dir))
        .fallback_service(ServeDir::new(&static_dir))
}

/// Creates the router: question API, health check and static assets
pub fn create_app<S: StorageImpl>(app_state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    let router = Router::new()
        .route("/api/questions", get(list_questions::<S>))
        .route("/health", get(health_check));

    let router = match app_state.config.assets.static_dir.clone() {
        Some(static_dir) => directory_assets(router, static_dir),
        None => bundled_assets(router),
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
        )
        .with_state(app_state)
}

async fn serve_app<F>(addr: SocketAddr, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Start the HTTP server with the configured AppState, stopping when `shutdown` resolves
pub async fn start_server<F>(configured_app_state: ConfiguredAppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let http_addr = configured_app_state.http_addr();
    match &configured_app_state.config().assets.static_dir {
        Some(dir) => log_info!("Static assets served from {}", dir.display()),
        None => log_info!("Serving bundled static assets"),
    }

    match configured_app_state {
        ConfiguredAppState::Memory(app_state) => serve_app(http_addr, create_app(app_state), shutdown).await,
        #[cfg(feature = "mongo")]
        ConfiguredAppState::Mongo(app_state) => serve_app(http_addr, create_app(app_state), shutdown).await,
    }
}
