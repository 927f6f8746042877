use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::category_service::CategoryService;
use crate::application::post_service::PostService;
use crate::application::user_service::UserService;
use crate::data::repositories::postgres::category_repository::PostgresCategoryRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) user_service: Arc<UserService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository>>,
    pub(crate) category_service: Arc<CategoryService<PostgresCategoryRepository>>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        user_service: Arc<UserService<PostgresUserRepository>>,
        post_service: Arc<PostService<PostgresPostRepository>>,
        category_service: Arc<CategoryService<PostgresCategoryRepository>>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            post_service,
            category_service,
        }
    }
}
