pub mod cors;
pub mod request_tracing;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Wrap the router in the standard layer stack: body limit, request tracing, CORS.
///
/// `DefaultBodyLimit` replaces the extractors' built-in 2 MiB cap so that
/// `max_body_bytes` is the only limit in force.
pub fn apply(router: Router, max_body_bytes: usize) -> Router {
    router
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(request_tracing::trace_layer())
        .layer(cors::cors_layer())
}
