use std::sync::Arc;

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{CurrentUser, LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::{DUMMY_PASSWORD_HASH, hash_password, verify_password};

/// Scheme prefix carried inside the session cookie value.
pub(crate) const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> AuthService<R> {
    pub(crate) fn new(repo: R, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let password_hash = hash_password(&req.password)?;
        let new_user = NewUser {
            username: req.username,
            email: req.email,
            password_hash,
        };

        self.repo.create_user(new_user).await
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_username(&req.username).await? {
            Some(user_creds) => user_creds,
            None => {
                // keep the miss as slow as a real check
                match verify_password(&req.password, DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        verify_password(&req.password, &user_creds.password_hash)?;

        let access_token = self
            .jwt
            .issue_token(&user_creds.user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    /// Resolves the raw session cookie value into the request identity.
    /// An absent cookie, a missing scheme prefix and an invalid or expired
    /// token all resolve to anonymous; a valid token whose subject has no
    /// user row is an error.
    pub(crate) async fn resolve_session(
        &self,
        cookie_value: Option<&str>,
    ) -> Result<Option<CurrentUser>, DomainError> {
        let Some(raw) = cookie_value else {
            return Ok(None);
        };
        let Some(token) = raw.strip_prefix(BEARER_PREFIX) else {
            return Ok(None);
        };
        let Ok(subject) = self.jwt.verify_token(token.trim()) else {
            return Ok(None);
        };

        match self.repo.find_by_username(&subject).await? {
            Some(creds) => Ok(Some(creds.user.into())),
            None => Err(DomainError::NotFound(format!(
                "user '{subject}' does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::{AuthService, BEARER_PREFIX};
    use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, Role, User};
    use crate::infrastructure::jwt::JwtService;
    use crate::infrastructure::password::hash_password;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        credentials: Arc<Mutex<Option<UserCredentials>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                credentials: Arc::new(Mutex::new(None)),
                create_user_out,
            }
        }

        fn set_credentials(&self, creds: Option<UserCredentials>) {
            *self.credentials.lock().expect("credentials mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .credentials
                .lock()
                .expect("credentials mutex poisoned")
                .clone())
        }

        async fn update_user(
            &self,
            _id: i64,
            _patch: UserPatch,
        ) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn set_role(&self, _id: i64, _role: Role) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn delete_user(&self, _id: i64) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn register_hashes_the_password_before_storing() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let req = RegisterRequest {
            username: "  valid_user  ".to_string(),
            email: "  VALID@EXAMPLE.COM  ".to_string(),
            password: "secret123".to_string(),
        };

        let user = service.register(req).await.expect("register must succeed");
        assert_eq!(user.username, "valid_user");

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.username, "valid_user");
        assert_eq!(created.email, "valid@example.com");
        assert_ne!(created.password_hash, "secret123");
        assert!(created.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn register_rejects_invalid_input_without_touching_the_store() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let req = RegisterRequest {
            username: "ab".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
        };

        let err = service.register(req).await.expect_err("must be rejected");
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        repo.set_credentials(None);
        let service = AuthService::new(repo, test_jwt());

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "secret123".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = hash_password("correct123").expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "valid_user"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "wrong4567".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = hash_password("correct123").expect("hash must be created");
        repo.set_credentials(Some(UserCredentials {
            user: sample_user(1, "valid_user"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            username: "valid_user".to_string(),
            password: "correct123".to_string(),
        };

        let result = service.login(req).await.expect("login must succeed");
        assert_eq!(result.user.id, 1);
        assert!(!result.access_token.is_empty());
    }

    #[tokio::test]
    async fn absent_cookie_resolves_to_anonymous() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo, test_jwt());

        let resolved = service.resolve_session(None).await.expect("must resolve");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn invalid_token_resolves_to_anonymous() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let service = AuthService::new(repo, test_jwt());

        let resolved = service
            .resolve_session(Some("Bearer not-a-token"))
            .await
            .expect("must resolve");
        assert!(resolved.is_none());

        let resolved = service
            .resolve_session(Some("missing-scheme-prefix"))
            .await
            .expect("must resolve");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn valid_token_resolves_to_the_current_user() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let jwt = test_jwt();
        let service = AuthService::new(repo.clone(), jwt.clone());

        repo.set_credentials(Some(UserCredentials {
            user: sample_user(7, "valid_user"),
            password_hash: "irrelevant".to_string(),
        }));

        let token = jwt.issue_token("valid_user").expect("must issue");
        let cookie = format!("{BEARER_PREFIX}{token}");

        let resolved = service
            .resolve_session(Some(&cookie))
            .await
            .expect("must resolve")
            .expect("must be authenticated");
        assert_eq!(resolved.user_id, 7);
        assert_eq!(resolved.username, "valid_user");
    }

    #[tokio::test]
    async fn valid_token_for_a_deleted_user_is_not_found() {
        let repo = FakeUserRepo::new(sample_user(1, "valid_user"));
        let jwt = test_jwt();
        let service = AuthService::new(repo, jwt.clone());

        let token = jwt.issue_token("ghost").expect("must issue");
        let cookie = format!("{BEARER_PREFIX}{token}");

        let err = service
            .resolve_session(Some(&cookie))
            .await
            .expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    fn sample_user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: Role::Client,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 3600))
    }
}
