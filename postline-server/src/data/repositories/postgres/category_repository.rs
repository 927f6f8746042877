use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::category_repository::CategoryRepository;
use crate::domain::category::{Category, CategoryPostCount};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    title: String,
}

#[derive(sqlx::FromRow)]
struct CategoryPostCountRow {
    id: i64,
    title: String,
    post_count: i64,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            title: self.title,
        }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create_category(&self, title: &str) -> Result<Category, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (title) VALUES ($1) RETURNING id, title",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(row.into_category())
    }

    async fn update_category(
        &self,
        id: i64,
        title: &str,
    ) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "UPDATE categories SET title = $2 WHERE id = $1 RETURNING id, title",
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT id, title FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_category_db_error)?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows =
            sqlx::query_as::<_, CategoryRow>("SELECT id, title FROM categories ORDER BY title")
                .fetch_all(&self.pool)
                .await
                .map_err(map_category_db_error)?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn list_with_published_posts(&self) -> Result<Vec<CategoryPostCount>, DomainError> {
        let rows = sqlx::query_as::<_, CategoryPostCountRow>(
            "SELECT c.id, c.title, COUNT(p.id) AS post_count \
             FROM categories c \
             JOIN posts p ON p.category_id = c.id AND p.published \
             GROUP BY c.id, c.title \
             ORDER BY c.title",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryPostCount {
                id: row.id,
                title: row.title,
                post_count: row.post_count,
            })
            .collect())
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_category_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_category_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        return DomainError::AlreadyExists("category title".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
