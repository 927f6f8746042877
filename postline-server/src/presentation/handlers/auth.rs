use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{CurrentUser, LoginRequest, RegisterRequest, Role, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::MessageResponse;
use crate::presentation::middleware::session::{
    SessionUser, expired_session_cookie, session_cookie,
};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct RegisterDto {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    pub(crate) username: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    #[schema(value_type = String)]
    pub(crate) role: Role,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) access_token: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CurrentUserDto {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    #[schema(value_type = String)]
    pub(crate) role: Role,
    pub(crate) is_active: bool,
    pub(crate) email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

impl From<CurrentUser> for CurrentUserDto {
    fn from(user: CurrentUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
            email: user.email,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken"),
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let req = RegisterRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    let user = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(dto): Json<LoginDto>,
) -> AppResult<(CookieJar, Json<AuthResponseDto>)> {
    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    let jar = jar.add(session_cookie(&result.access_token));

    Ok((
        jar,
        Json(AuthResponseDto {
            access_token: result.access_token,
            user: result.user.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
    )
)]
pub(crate) async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(expired_session_cookie());
    (jar, Json(MessageResponse::new("logged out")))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "The resolved identity", body = CurrentUserDto),
        (status = 401, description = "Not authenticated"),
    )
)]
pub(crate) async fn me(SessionUser(user): SessionUser) -> Json<CurrentUserDto> {
    Json(CurrentUserDto::from(user))
}
