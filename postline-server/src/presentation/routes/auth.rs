use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::presentation::AppState;
use crate::presentation::handlers::auth::{login, logout, me, register};
use crate::presentation::middleware::session::session_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout));

    let protected = Router::new().route("/me", get(me)).layer(
        middleware::from_fn_with_state(state, session_middleware),
    );

    public.merge(protected)
}
