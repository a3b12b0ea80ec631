//! Route table and middleware

use super::handlers::{api_solve, health, index, internal_error, not_found, solve_form};
use super::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body (image uploads included)
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(index))
        .route("/solve", post(solve_form))
        .route("/api/solve", post(api_solve))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state);

    with_middleware(routes)
}

pub(crate) fn with_middleware(router: Router) -> Router {
    router
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
}
