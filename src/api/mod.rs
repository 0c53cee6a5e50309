// API layer: routes, handlers, error normalization

pub mod errors;
pub mod handlers;
pub mod middleware;

use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use self::handlers::users;

/// Upper bound on any single request, database work included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the application router over the shared pool.
///
/// Pipeline order: liveness route, the five user operations, then the
/// not-found translator for unmatched paths. Each method router carries the
/// same translator so a wrong method on a known path is a 404, not a bare
/// 405. Error normalization happens in [`errors::ApiError`]'s
/// `IntoResponse`.
pub fn router(pool: PgPool) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/app", get(users::liveness).fallback(users::not_found))
        .route(
            "/register",
            post(users::register).fallback(users::not_found),
        )
        .route("/login", post(users::login).fallback(users::not_found))
        .route("/view", get(users::view).fallback(users::not_found))
        .route("/edit", post(users::edit).fallback(users::not_found))
        .route("/delete", delete(users::delete).fallback(users::not_found))
        .fallback(users::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(cors),
        )
        .with_state(pool)
}
