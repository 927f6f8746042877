use axum::middleware;
use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    create_post, delete_post, get_post, list_posts, posts_by_category, publish_post, search_posts,
    update_post,
};
use crate::presentation::middleware::session::session_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/search", get(search_posts))
        .route("/category/{category_id}", get(posts_by_category))
        .route("/{id}", get(get_post));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/{id}", put(update_post).delete(delete_post))
        .route("/{id}/publish", patch(publish_post))
        .layer(middleware::from_fn_with_state(state, session_middleware));

    public.merge(protected)
}
