use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::{Arc, RwLock};

pub mod handlers;
pub mod responses;

pub fn router(state: Arc<RwLock<AppState>>) -> Router {
    Router::new()
        .route(
            "/api/dispatch",
            get(handlers::get_dispatch).post(handlers::post_dispatch),
        )
        .route("/api/fleet", get(handlers::get_fleet))
        .route("/api/health", get(handlers::get_health))
        .with_state(state)
}
