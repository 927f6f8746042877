use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::MessageResponse;
use crate::presentation::handlers::auth::{
    AuthResponseDto, CurrentUserDto, LoginDto, RegisterDto, UserDto,
};
use crate::presentation::handlers::categories::{
    CategoryDto, CategoryPostCountDto, CategoryTitleDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, PaginationQuery, PostDto, PostOverviewDto, PostPageDto, PublishDto, SearchQuery,
    SearchResponseDto, UpdatePostDto,
};
use crate::presentation::handlers::users::{RoleUpdateDto, UpdateUserDto};
use crate::presentation::middleware::session::SESSION_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::auth::logout,
        crate::presentation::handlers::auth::me,
        crate::presentation::handlers::users::update_user,
        crate::presentation::handlers::users::change_role,
        crate::presentation::handlers::users::delete_user,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::search_posts,
        crate::presentation::handlers::posts::posts_by_category,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::publish_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::categories::list_categories,
        crate::presentation::handlers::categories::categories_with_posts,
        crate::presentation::handlers::categories::get_category,
        crate::presentation::handlers::categories::create_category,
        crate::presentation::handlers::categories::update_category,
        crate::presentation::handlers::categories::delete_category
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            AuthResponseDto,
            UserDto,
            CurrentUserDto,
            UpdateUserDto,
            RoleUpdateDto,
            CreatePostDto,
            UpdatePostDto,
            PublishDto,
            PaginationQuery,
            SearchQuery,
            PostDto,
            PostOverviewDto,
            PostPageDto,
            SearchResponseDto,
            CategoryTitleDto,
            CategoryDto,
            CategoryPostCountDto,
            MessageResponse
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and the session cookie"),
        (name = "users", description = "Account management"),
        (name = "posts", description = "Posts, listings and search"),
        (name = "categories", description = "Post categories")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        openapi.components = Some(components);
    }
}
