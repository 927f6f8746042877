use crate::data::category_repository::CategoryRepository;
use crate::domain::category::{Category, CategoryPostCount, CategoryRequest};
use crate::domain::error::DomainError;
use crate::domain::policy;
use crate::domain::user::CurrentUser;

pub(crate) struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_category(
        &self,
        actor: &CurrentUser,
        req: CategoryRequest,
    ) -> Result<Category, DomainError> {
        policy::can_manage_categories(actor)?;
        let req = req.validate()?;

        self.repo.create_category(&req.title).await
    }

    pub(crate) async fn update_category(
        &self,
        actor: &CurrentUser,
        category_id: i64,
        req: CategoryRequest,
    ) -> Result<Category, DomainError> {
        policy::can_manage_categories(actor)?;
        let req = req.validate()?;

        self.repo
            .update_category(category_id, &req.title)
            .await?
            .ok_or(DomainError::NotFound(format!(
                "category id: {category_id}"
            )))
    }

    pub(crate) async fn get_category(&self, category_id: i64) -> Result<Category, DomainError> {
        self.repo
            .get_category(category_id)
            .await?
            .ok_or(DomainError::NotFound(format!(
                "category id: {category_id}"
            )))
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories().await
    }

    /// Categories that have at least one published post, with the count.
    pub(crate) async fn list_with_published_posts(
        &self,
    ) -> Result<Vec<CategoryPostCount>, DomainError> {
        self.repo.list_with_published_posts().await
    }

    pub(crate) async fn delete_category(
        &self,
        actor: &CurrentUser,
        category_id: i64,
    ) -> Result<(), DomainError> {
        policy::can_manage_categories(actor)?;

        let deleted = self.repo.delete_category(category_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!(
                "category id: {category_id}"
            )));
        }
        Ok(())
    }
}
