use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;

use crate::presentation::AppState;
use crate::presentation::handlers::categories::{
    categories_with_posts, create_category, delete_category, get_category, list_categories,
    update_category,
};
use crate::presentation::middleware::session::session_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_categories))
        .route("/with_posts", get(categories_with_posts))
        .route("/{id}", get(get_category));

    let protected = Router::new()
        .route("/", post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .layer(middleware::from_fn_with_state(state, session_middleware));

    public.merge(protected)
}
