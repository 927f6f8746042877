use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum Role {
    Admin,
    #[default]
    Client,
}

impl Role {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Client => "CLIENT",
        }
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "ADMIN" => Ok(Role::Admin),
            "CLIENT" => Ok(Role::Client),
            other => Err(DomainError::Unexpected(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) role: Role,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
}

/// Identity resolved from the session cookie for one request.
#[derive(Debug, Clone)]
pub(crate) struct CurrentUser {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) role: Role,
    pub(crate) is_active: bool,
    pub(crate) email: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = validation::username(&self.username);
        let email = validation::email(&self.email);
        let password = validation::password(&self.password);

        match (username, email, password) {
            (Ok(username), Ok(email), Ok(password)) => Ok(Self {
                username,
                email,
                password,
            }),
            (username, email, password) => {
                let errors = [username.err(), email.err(), password.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(DomainError::Validation(errors))
            }
        }
    }
}

/// Account update carries the same field rules as registration; the
/// password is re-hashed on every update.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpdateUserRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl UpdateUserRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let req = RegisterRequest {
            username: self.username,
            email: self.email,
            password: self.password,
        }
        .validate()?;

        Ok(Self {
            username: req.username,
            email: req.email,
            password: req.password,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}
