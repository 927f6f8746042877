use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::post_repository::{NewPost, PageSlice, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostOverview};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_overviews(
        &self,
        filter_sql: &str,
        bind: Option<BindValue<'_>>,
        slice: PageSlice,
    ) -> Result<Vec<PostOverview>, DomainError> {
        let (limit_pos, offset_pos) = if bind.is_some() { (2, 3) } else { (1, 2) };
        let sql = format!(
            "{OVERVIEW_SELECT} WHERE {filter_sql} \
             ORDER BY p.id DESC LIMIT ${limit_pos} OFFSET ${offset_pos}"
        );

        let mut query = sqlx::query_as::<_, PostOverviewRow>(&sql);
        query = match bind {
            Some(BindValue::Id(id)) => query.bind(id),
            Some(BindValue::Text(text)) => query.bind(text),
            None => query,
        };

        let rows = query
            .bind(slice.limit)
            .bind(slice.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(PostOverviewRow::into_overview).collect())
    }
}

enum BindValue<'a> {
    Id(i64),
    Text(&'a str),
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    category_id: Option<i64>,
    published: bool,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PostOverviewRow {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    category_id: Option<i64>,
    published: bool,
    created_at: DateTime<Utc>,
    author: String,
    category_title: Option<String>,
}

const POST_COLUMNS: &str = "id, title, content, author_id, category_id, published, created_at";

const OVERVIEW_SELECT: &str = "SELECT p.id, p.title, p.content, p.author_id, p.category_id, \
     p.published, p.created_at, u.username AS author, c.title AS category_title \
     FROM posts p \
     JOIN users u ON u.id = p.author_id \
     LEFT JOIN categories c ON c.id = p.category_id";

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            category_id: self.category_id,
            published: self.published,
            created_at: self.created_at,
        }
    }
}

impl PostOverviewRow {
    fn into_overview(self) -> PostOverview {
        PostOverview {
            post: Post {
                id: self.id,
                title: self.title,
                content: self.content,
                author_id: self.author_id,
                category_id: self.category_id,
                published: self.published,
                created_at: self.created_at,
            },
            author: self.author,
            category_title: self.category_title,
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id, category_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .bind(input.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.into_post())
    }

    async fn get_post(&self, id: i64) -> Result<Option<PostOverview>, DomainError> {
        let sql = format!("{OVERVIEW_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostOverviewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.map(PostOverviewRow::into_overview))
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let sql = format!(
            "UPDATE posts \
             SET title = $2, content = $3, category_id = $4 \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.content)
            .bind(patch.category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.map(PostRow::into_post))
    }

    async fn set_published(&self, id: i64, published: bool) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE posts SET published = $2 WHERE id = $1")
            .bind(id)
            .bind(published)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_published(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE published")
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)
    }

    async fn list_published(&self, slice: PageSlice) -> Result<Vec<PostOverview>, DomainError> {
        self.fetch_overviews("p.published", None, slice).await
    }

    async fn count_published_in_category(&self, category_id: i64) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts WHERE published AND category_id = $1",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)
    }

    async fn list_published_in_category(
        &self,
        category_id: i64,
        slice: PageSlice,
    ) -> Result<Vec<PostOverview>, DomainError> {
        self.fetch_overviews(
            "p.published AND p.category_id = $1",
            Some(BindValue::Id(category_id)),
            slice,
        )
        .await
    }

    async fn count_title_matches(&self, needle: &str) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts \
             WHERE published AND LOWER(title) LIKE '%' || LOWER($1) || '%'",
        )
        .bind(needle)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)
    }

    async fn search_by_title(
        &self,
        needle: &str,
        slice: PageSlice,
    ) -> Result<Vec<PostOverview>, DomainError> {
        self.fetch_overviews(
            "p.published AND LOWER(p.title) LIKE '%' || LOWER($1) || '%'",
            Some(BindValue::Text(needle)),
            slice,
        )
        .await
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("posts_category_id_fkey") => "category",
            Some("posts_author_id_fkey") => "author",
            _ => "reference",
        };
        return DomainError::NotFound(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
