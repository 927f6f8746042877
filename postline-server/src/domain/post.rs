use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: Option<i64>,
    pub(crate) published: bool,
    pub(crate) created_at: DateTime<Utc>,
}

/// A post joined with the metadata every listing and detail view needs:
/// the author's username and the category title, when one is set.
#[derive(Debug, Clone)]
pub(crate) struct PostOverview {
    pub(crate) post: Post,
    pub(crate) author: String,
    pub(crate) category_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: Option<i64>,
}

/// Validated shape shared by create and update; the category reference is
/// required on submission even though stored posts may end up uncategorized
/// when their category is later deleted.
#[derive(Debug, Clone)]
pub(crate) struct PostInput {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
}

fn validate_post_fields(
    title: &str,
    content: &str,
    category_id: Option<i64>,
) -> Result<PostInput, DomainError> {
    let title = validation::post_title(title);
    let content = validation::post_content(content);
    let category_id = validation::category_ref(category_id);

    match (title, content, category_id) {
        (Ok(title), Ok(content), Ok(category_id)) => Ok(PostInput {
            title,
            content,
            category_id,
        }),
        (title, content, category_id) => {
            let errors = [title.err(), content.err(), category_id.err()]
                .into_iter()
                .flatten()
                .collect();
            Err(DomainError::Validation(errors))
        }
    }
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<PostInput, DomainError> {
        validate_post_fields(&self.title, &self.content, self.category_id)
    }
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<PostInput, DomainError> {
        validate_post_fields(&self.title, &self.content, self.category_id)
    }
}
