//! Route definitions
//!
//! Organizes the API surface and applies the middleware stack.

use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

mod auth;
mod exercises;
mod health;
mod plans;
mod recipes;
mod users;

pub use auth::auth_routes;
pub use exercises::exercise_routes;
pub use plans::plan_routes;
pub use recipes::recipe_routes;
pub use users::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors.allowed_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/database-status", get(health::database_status))
        .nest("/api", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/info", get(health::api_info))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/exercises", exercise_routes())
        .nest("/recipes", recipe_routes())
        .nest("/plans", plan_routes())
}

/// CORS layer from the configured origin allow-list. A literal "*" opens
/// the API up entirely (development only).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
