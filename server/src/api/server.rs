//! HTTP server implementation for the geographic reference API

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use refdata_core::{
    core::{AppState, ConfiguredAppState},
    log_info,
    storage::StorageImpl,
};

/// Creates the main application router with all routes and middleware
pub fn create_app<S: StorageImpl>(app_state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        // Country routes
        .route("/countries", get(handlers::list_countries::<S>))
        .route("/countries/active", get(handlers::list_active_countries::<S>))

        // Subdivision routes, keyed by parent id
        .route("/states/{country_id}", get(handlers::list_states::<S>))
        .route("/lgas/{state_id}", get(handlers::list_lgas::<S>))
        .route(
            "/cities/{state_id}",
            get(handlers::list_cities::<S>).post(handlers::add_cities::<S>),
        )

        // System routes
        .route("/health", get(handlers::health_check))

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

    log_info!("Server listening on http://{}", addr);
    log_info!("Health check available at http://{}/health", addr);

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
    log_info!(
        "Starting reference data API on {} with {} store",
        http_addr,
        configured_app_state.backend_name()
    );

    // Match once on storage type to get concrete AppState, then start server
    match configured_app_state {
        ConfiguredAppState::Memory(app_state) => serve_app(http_addr, create_app(app_state), shutdown).await,
        #[cfg(feature = "mongo")]
        ConfiguredAppState::Mongo(app_state) => serve_app(http_addr, create_app(app_state), shutdown).await,
    }
}
