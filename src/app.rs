use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/contribution",
            get(handlers::get_contribution).post(handlers::update_contribution),
        )
        .route("/api/projection", get(handlers::get_projection))
        .with_state(state)
}
