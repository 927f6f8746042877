use async_trait::async_trait;

use crate::domain::category::{Category, CategoryPostCount};
use crate::domain::error::DomainError;

#[async_trait]
pub(crate) trait CategoryRepository: Send + Sync {
    async fn create_category(&self, title: &str) -> Result<Category, DomainError>;
    async fn update_category(&self, id: i64, title: &str)
    -> Result<Option<Category>, DomainError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError>;
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    async fn list_with_published_posts(&self) -> Result<Vec<CategoryPostCount>, DomainError>;
    async fn delete_category(&self, id: i64) -> Result<bool, DomainError>;
}
