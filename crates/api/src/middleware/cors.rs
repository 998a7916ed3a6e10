use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the post routes; only the verbs they use are allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
