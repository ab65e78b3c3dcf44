//! HTTP route handlers.
//!
//! The service exposes a single liveness route. Cross-origin access is open to
//! every origin, and health answers are marked `no-store` so proxies never
//! replay a stale "alive".
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;

use axum::{
    http::{
        header::{HeaderName, HeaderValue, CACHE_CONTROL},
        Method,
    },
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_HEALTH, HEALTH_PATH, REQUEST_ID_HEADER};
use crate::middleware::request_id_layer;

/// Build the CORS layer: any origin, read-only methods, any request header.
///
/// `x-request-id` is exposed so browser callers can quote it when reporting a
/// failed probe.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

/// Creates the Axum router with the health route and its layers.
pub fn create_router() -> Router {
    // Health check - no caching, always fresh for liveness probes.
    // route_layer keeps the header off 404/405 answers.
    let health_routes = Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route_layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(health_routes)
        .layer(cors_layer())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
