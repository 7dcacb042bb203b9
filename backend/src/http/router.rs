//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Build the CORS layer. `None` or `"*"` allows any origin.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(str::trim) {
        None | Some("") | Some("*") => cors.allow_origin(Any),
        Some(origin) => match HeaderValue::from_str(origin) {
            Ok(value) => cors.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin, "invalid CORS origin, allowing any");
                cors.allow_origin(Any)
            }
        },
    }
}

/// Create the application router with permissive CORS.
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, cors_layer(None))
}

/// Create the main application router with all routes and middleware.
pub fn create_router_with_cors(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/login", post(handlers::login))
        // Catalog
        .route("/cars", get(handlers::list_cars).post(handlers::create_car))
        .route("/cars/analytics", get(handlers::get_analytics))
        .route(
            "/cars/{id}",
            get(handlers::get_car)
                .patch(handlers::update_car)
                .delete(handlers::delete_car),
        )
        // User management
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
