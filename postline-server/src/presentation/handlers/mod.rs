use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod auth;
pub(crate) mod categories;
pub(crate) mod posts;
pub(crate) mod users;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
