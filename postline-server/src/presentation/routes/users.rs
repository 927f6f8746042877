use axum::middleware;
use axum::routing::{patch, put};
use axum::Router;

use crate::presentation::AppState;
use crate::presentation::handlers::users::{change_role, delete_user, update_user};
use crate::presentation::middleware::session::session_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", put(update_user).delete(delete_user))
        .route("/{id}/role", patch(change_role))
        .layer(middleware::from_fn_with_state(state, session_middleware))
}
