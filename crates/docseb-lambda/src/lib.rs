//! docseb-lambda
//!
//! HTTP surface for the dashboard: instrument catalogs, scoring, and the
//! PIN session check. Runs under `lambda_http`; the router is exposed here
//! so it can be exercised without a Lambda runtime.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let origin = match &state.config.allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::from(Any),
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route(
            "/instruments/{id}/score",
            post(routes::instruments::score_instrument),
        )
        .route(
            "/lysholm/interpret",
            get(routes::instruments::interpret_lysholm_score),
        )
        .route("/session", post(routes::session::start_session))
        .route("/session/status", post(routes::session::session_status))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
