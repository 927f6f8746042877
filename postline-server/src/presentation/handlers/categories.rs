use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::category::{Category, CategoryPostCount, CategoryRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::MessageResponse;
use crate::presentation::middleware::session::SessionUser;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CategoryTitleDto {
    pub(crate) title: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) title: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryPostCountDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) post_count: i64,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
        }
    }
}

impl From<CategoryPostCount> for CategoryPostCountDto {
    fn from(entry: CategoryPostCount) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            post_count: entry.post_count,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryDto]),
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryDto>>> {
    let categories = state.category_service.list_categories().await?;

    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/categories/with_posts",
    tag = "categories",
    responses(
        (status = 200, description = "Categories holding at least one published post", body = [CategoryPostCountDto]),
    )
)]
pub(crate) async fn categories_with_posts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryPostCountDto>>> {
    let entries = state.category_service.list_with_published_posts().await?;

    Ok(Json(
        entries.into_iter().map(CategoryPostCountDto::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "Category not found"),
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CategoryDto>> {
    let category = state.category_service.get_category(id).await?;

    Ok(Json(CategoryDto::from(category)))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    security(("session_cookie" = [])),
    request_body = CategoryTitleDto,
    responses(
        (status = 201, description = "Category created", body = CategoryDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Title taken, or not an administrator"),
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Json(dto): Json<CategoryTitleDto>,
) -> AppResult<(StatusCode, Json<CategoryDto>)> {
    let req = CategoryRequest { title: dto.title };

    let category = state.category_service.create_category(&actor, req).await?;

    Ok((StatusCode::CREATED, Json(CategoryDto::from(category))))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryTitleDto,
    responses(
        (status = 202, description = "Category renamed", body = CategoryDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Title taken, or not an administrator"),
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
    Json(dto): Json<CategoryTitleDto>,
) -> AppResult<(StatusCode, Json<CategoryDto>)> {
    let req = CategoryRequest { title: dto.title };

    let category = state
        .category_service
        .update_category(&actor, id, req)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(CategoryDto::from(category))))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted, its posts become uncategorized", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Not an administrator"),
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.category_service.delete_category(&actor, id).await?;

    Ok(Json(MessageResponse::new(format!(
        "Category ID: {id} deleted"
    ))))
}
