//! mindsignal-server
//!
//! HTTP front end: a JSON API and server-rendered pages over the forum
//! client, the post classifier and the questionnaire scorer.

pub mod config;
pub mod error;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Instruments (public schema data)
        .route("/api/instruments", get(routes::instruments::list_instruments))
        .route(
            "/api/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route("/api/normalize", post(routes::classify::normalize))
        .route("/api/classify", post(routes::classify::classify))
        .route(
            "/api/forums/{forum}/sample",
            get(routes::forums::sample_post),
        )
        .route(
            "/api/users/{user}/assessment",
            get(routes::users::assessment),
        )
        // HTML pages
        .route("/", get(routes::ui::index))
        .route("/ui/classify", post(routes::ui::classify))
        .route("/ui/forum", post(routes::ui::forum))
        .route("/ui/assessment", post(routes::ui::assessment))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
