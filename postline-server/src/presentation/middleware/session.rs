use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::application::auth_service::BEARER_PREFIX;
use crate::domain::user::CurrentUser;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// Fixed name of the cookie carrying the `"Bearer <token>"` value.
pub(crate) const SESSION_COOKIE: &str = "postline_session";

/// Identity resolved by [`session_middleware`]; extracting it from a route
/// that never resolved one answers 401.
#[derive(Debug, Clone)]
pub(crate) struct SessionUser(pub(crate) CurrentUser);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolves the session cookie into a [`SessionUser`] request extension.
/// Anonymous requests pass through untouched; only a valid token whose
/// user row has disappeared fails the request here.
pub(crate) async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let cookie_value = jar.get(SESSION_COOKIE).map(|cookie| cookie.value().to_string());

    if let Some(user) = state
        .auth_service
        .resolve_session(cookie_value.as_deref())
        .await?
    {
        request.extensions_mut().insert(SessionUser(user));
    }

    Ok(next.run(request).await)
}

pub(crate) fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, format!("{BEARER_PREFIX}{token}")))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub(crate) fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .build()
}
