pub mod health;
pub mod posts;

use axum::Router;

use crate::middleware;
use crate::state::AppState;

/// Assemble the full router with all route groups and the middleware stack.
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config().max_body_bytes;
    let router = Router::new()
        .merge(health::routes())
        .merge(posts::routes())
        .with_state(state);
    middleware::apply(router, max_body_bytes)
}
