//! Role and ownership checks for every mutating operation. All handlers go
//! through these decisions; none carries its own role logic.

use super::error::DomainError;
use super::user::{CurrentUser, Role};

pub(crate) fn can_manage_categories(actor: &CurrentUser) -> Result<(), DomainError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "only an administrator can manage categories",
        ))
    }
}

pub(crate) fn can_change_role(actor: &CurrentUser) -> Result<(), DomainError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "only an administrator can change a user's role",
        ))
    }
}

pub(crate) fn can_modify_user(actor: &CurrentUser, target_user_id: i64) -> Result<(), DomainError> {
    if actor.role == Role::Admin || actor.user_id == target_user_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "you can only manage your own account",
        ))
    }
}

pub(crate) fn can_modify_post(actor: &CurrentUser, post_author_id: i64) -> Result<(), DomainError> {
    if actor.role == Role::Admin || actor.user_id == post_author_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "you are not the author of this post",
        ))
    }
}

pub(crate) fn can_publish_post(actor: &CurrentUser) -> Result<(), DomainError> {
    if actor.role == Role::Admin {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "only an administrator can change the publication status of a post",
        ))
    }
}
