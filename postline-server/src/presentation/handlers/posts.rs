use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::post_service::{PostPage, SearchOutcome};
use crate::domain::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::domain::post::{CreatePostRequest, Post, PostOverview, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::MessageResponse;
use crate::presentation::middleware::session::SessionUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PaginationQuery {
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
}

impl PaginationQuery {
    fn page_and_limit(&self) -> (u32, u32) {
        (
            self.page.unwrap_or(DEFAULT_PAGE),
            self.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SearchQuery {
    pub(crate) term: String,
    pub(crate) page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreatePostDto {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdatePostDto {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PublishDto {
    pub(crate) published: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: Option<i64>,
    pub(crate) published: bool,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostOverviewDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: String,
    pub(crate) category: Option<String>,
    pub(crate) published: bool,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostPageDto {
    pub(crate) data: Vec<PostOverviewDto>,
    pub(crate) total_pages: u64,
    pub(crate) show_pagination: bool,
}

/// A zero-hit search answers with `not_found` and no pagination fields.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum SearchResponseDto {
    NotFound { not_found: String },
    Page(PostPageDto),
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            category_id: post.category_id,
            published: post.published,
            created_at: post.created_at,
        }
    }
}

impl From<PostOverview> for PostOverviewDto {
    fn from(overview: PostOverview) -> Self {
        Self {
            id: overview.post.id,
            title: overview.post.title,
            content: overview.post.content,
            author: overview.author,
            category: overview.category_title,
            published: overview.post.published,
            created_at: overview.post.created_at,
        }
    }
}

impl From<PostPage> for PostPageDto {
    fn from(page: PostPage) -> Self {
        Self {
            data: page.posts.into_iter().map(PostOverviewDto::from).collect(),
            total_pages: page.total_pages,
            show_pagination: page.show_pagination,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (default 9, 1..=100)")
    ),
    responses(
        (status = 200, description = "Published posts, newest first", body = PostPageDto),
        (status = 400, description = "Validation error"),
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<PostPageDto>> {
    query.validate()?;
    let (page, limit) = query.page_and_limit();

    let result = state.post_service.list_published(page, limit).await?;

    Ok(Json(PostPageDto::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/posts/search",
    tag = "posts",
    params(
        ("term" = String, Query, description = "Case-insensitive title substring"),
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (default 9, 1..=100)")
    ),
    responses(
        (status = 200, description = "Matching published posts, or a not-found marker", body = SearchResponseDto),
        (status = 400, description = "Validation error"),
    )
)]
pub(crate) async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResponseDto>> {
    query.validate()?;
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let outcome = state.post_service.search(&query.term, page, limit).await?;

    let response = match outcome {
        SearchOutcome::NotFound { term } => SearchResponseDto::NotFound {
            not_found: format!("Post {term} not found"),
        },
        SearchOutcome::Page(page) => SearchResponseDto::Page(PostPageDto::from(page)),
    };

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/posts/category/{category_id}",
    tag = "posts",
    params(
        ("category_id" = i64, Path, description = "Category id"),
        ("page" = Option<u32>, Query, description = "Page number (default 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (default 9, 1..=100)")
    ),
    responses(
        (status = 200, description = "Published posts of one category", body = PostPageDto),
        (status = 400, description = "Validation error"),
    )
)]
pub(crate) async fn posts_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<PostPageDto>> {
    query.validate()?;
    let (page, limit) = query.page_and_limit();

    let result = state
        .post_service
        .list_by_category(category_id, page, limit)
        .await?;

    Ok(Json(PostPageDto::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = PostOverviewDto),
        (status = 404, description = "Post not found"),
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostOverviewDto>> {
    let overview = state.post_service.get_post(id).await?;

    Ok(Json(PostOverviewDto::from(overview)))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("session_cookie" = [])),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created, unpublished", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Category not found"),
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category_id,
    };

    let post = state.post_service.create_post(&actor, req).await?;

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Post id")),
    request_body = UpdatePostDto,
    responses(
        (status = 202, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Not the author"),
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
        category_id: dto.category_id,
    };

    let post = state.post_service.update_post(&actor, id, req).await?;

    Ok((StatusCode::ACCEPTED, Json(PostDto::from(post))))
}

#[utoipa::path(
    patch,
    path = "/api/posts/{id}/publish",
    tag = "posts",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Post id")),
    request_body = PublishDto,
    responses(
        (status = 202, description = "Publication flag changed", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Only an administrator can publish"),
    )
)]
pub(crate) async fn publish_post(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
    Json(dto): Json<PublishDto>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let published = dto.published.unwrap_or(true);

    state.post_service.set_published(&actor, id, published).await?;

    let message = if published {
        format!("Post ID: {id} published")
    } else {
        format!("Post ID: {id} unpublished")
    };
    Ok((StatusCode::ACCEPTED, Json(MessageResponse::new(message))))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Not the author"),
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.post_service.delete_post(&actor, id).await?;

    Ok(Json(MessageResponse::new(format!("Post ID: {id} deleted"))))
}
