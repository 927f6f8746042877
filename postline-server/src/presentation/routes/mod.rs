use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod posts;
pub(crate) mod users;

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/users", users::router(state.clone()))
        .nest("/api/posts", posts::router(state.clone()))
        .nest("/api/categories", categories::router(state.clone()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
