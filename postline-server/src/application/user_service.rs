use crate::data::user_repository::{UserPatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::policy;
use crate::domain::user::{CurrentUser, Role, UpdateUserRequest, User};
use crate::infrastructure::password::hash_password;

pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn update_account(
        &self,
        actor: &CurrentUser,
        target_user_id: i64,
        req: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        policy::can_modify_user(actor, target_user_id)?;
        let req = req.validate()?;

        let patch = UserPatch {
            username: req.username,
            email: req.email,
            password_hash: hash_password(&req.password)?,
        };

        self.repo
            .update_user(target_user_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!(
                "user id: {target_user_id}"
            )))
    }

    pub(crate) async fn change_role(
        &self,
        actor: &CurrentUser,
        target_user_id: i64,
        role: Role,
    ) -> Result<User, DomainError> {
        policy::can_change_role(actor)?;

        self.repo
            .set_role(target_user_id, role)
            .await?
            .ok_or(DomainError::NotFound(format!(
                "user id: {target_user_id}"
            )))
    }

    pub(crate) async fn delete_account(
        &self,
        actor: &CurrentUser,
        target_user_id: i64,
    ) -> Result<(), DomainError> {
        policy::can_modify_user(actor, target_user_id)?;

        let deleted = self.repo.delete_user(target_user_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!(
                "user id: {target_user_id}"
            )));
        }
        Ok(())
    }
}
