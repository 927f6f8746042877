use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::user::{Role, UpdateUserRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::MessageResponse;
use crate::presentation::handlers::auth::UserDto;
use crate::presentation::middleware::session::SessionUser;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateUserDto {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RoleUpdateDto {
    #[schema(value_type = String)]
    pub(crate) role: Role,
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 202, description = "Account updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Not the account owner, or username/email taken"),
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateUserDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let req = UpdateUserRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    let user = state.user_service.update_account(&actor, id, req).await?;

    Ok((StatusCode::ACCEPTED, Json(UserDto::from(user))))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    tag = "users",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = RoleUpdateDto,
    responses(
        (status = 202, description = "Role changed", body = UserDto),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Only an administrator can change roles"),
    )
)]
pub(crate) async fn change_role(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
    Json(dto): Json<RoleUpdateDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.user_service.change_role(&actor, id, dto.role).await?;

    Ok((StatusCode::ACCEPTED, Json(UserDto::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Account deleted, owned posts cascade", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Not the account owner"),
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    SessionUser(actor): SessionUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.delete_account(&actor, id).await?;

    Ok(Json(MessageResponse::new(format!("User ID: {id} deleted"))))
}
