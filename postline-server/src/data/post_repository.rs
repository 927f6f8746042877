use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::pagination::PageWindow;
use crate::domain::post::{Post, PostOverview};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
}

/// LIMIT/OFFSET form of a page window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageSlice {
    pub(crate) limit: i64,
    pub(crate) offset: i64,
}

impl From<PageWindow> for PageSlice {
    fn from(window: PageWindow) -> Self {
        Self {
            limit: (window.end - window.start) as i64,
            offset: window.start as i64,
        }
    }
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<PostOverview>, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    async fn set_published(&self, id: i64, published: bool) -> Result<bool, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;

    async fn count_published(&self) -> Result<i64, DomainError>;
    async fn list_published(&self, slice: PageSlice) -> Result<Vec<PostOverview>, DomainError>;

    async fn count_published_in_category(&self, category_id: i64) -> Result<i64, DomainError>;
    async fn list_published_in_category(
        &self,
        category_id: i64,
        slice: PageSlice,
    ) -> Result<Vec<PostOverview>, DomainError>;

    async fn count_title_matches(&self, needle: &str) -> Result<i64, DomainError>;
    async fn search_by_title(
        &self,
        needle: &str,
        slice: PageSlice,
    ) -> Result<Vec<PostOverview>, DomainError>;
}
