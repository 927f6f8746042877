use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    email: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    password_hash: String,
}

const USER_COLUMNS: &str = "id, username, email, role, is_active, created_at";

impl UserRow {
    fn into_user(self) -> Result<User, DomainError> {
        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            role: Role::parse(&self.role)?,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

impl UserCredentialsRow {
    fn into_credentials(self) -> Result<UserCredentials, DomainError> {
        Ok(UserCredentials {
            user: User {
                id: self.id,
                username: self.username,
                email: self.email,
                role: Role::parse(&self.role)?,
                is_active: self.is_active,
                created_at: self.created_at,
            },
            password_hash: self.password_hash,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.into_user()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS}, password_hash \
             FROM users \
             WHERE username = $1"
        );
        let row = sqlx::query_as::<_, UserCredentialsRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.map(UserCredentialsRow::into_credentials).transpose()
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "UPDATE users \
             SET username = $2, email = $3, password_hash = $4 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(&patch.username)
            .bind(&patch.email)
            .bind(&patch.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "UPDATE users \
             SET role = $2 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.map(UserRow::into_user).transpose()
    }

    async fn delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_username_key") => "username",
            Some("users_email_key") => "email",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
