//! # Routes
//!
//! Axum router configuration for the storefront.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - GET  /api/v1/pages/home - Home page props
/// - GET  /api/v1/pages/products/{product_id} - Product detail props
/// - POST /api/v1/checkout - Initiate checkout, 303 to the session URL
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let page_routes = Router::new()
        .route("/home", get(handlers::home_page))
        .route("/products/{product_id}", get(handlers::product_page));

    let api_routes = Router::new()
        .nest("/pages", page_routes)
        .route("/checkout", post(handlers::create_checkout));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
