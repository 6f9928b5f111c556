//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderName, Method},
    middleware,
    routing::{get, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::{BaseSearchIndex, ServerDeps};
use crate::server::middleware::api_key_auth_middleware;
use crate::server::routes::{
    click_resource_handler, get_resource_handler, health_handler, update_resource_handler,
    vote_resource_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(
    pool: PgPool,
    search_index: Arc<dyn BaseSearchIndex>,
    strict_index_sync: bool,
) -> Router {
    let server_deps = Arc::new(ServerDeps::new(
        pool.clone(),
        search_index,
        strict_index_sync,
    ));

    let app_state = AppState {
        db_pool: pool.clone(),
        server_deps,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static("x-apikey")]);

    // The static "click" segment wins over the :direction parameter, so the
    // click route stays reachable.
    Router::new()
        .route(
            "/api/v1/resources/:id",
            get(get_resource_handler).put(update_resource_handler),
        )
        .route("/api/v1/resources/:id/click", put(click_resource_handler))
        .route(
            "/api/v1/resources/:id/:direction",
            put(vote_resource_handler),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            api_key_auth_middleware(pool.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
