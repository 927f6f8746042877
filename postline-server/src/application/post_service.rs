use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::pagination::paginate;
use crate::domain::policy;
use crate::domain::post::{CreatePostRequest, Post, PostOverview, UpdatePostRequest};
use crate::domain::user::CurrentUser;

/// One page of a published-post listing, with the totals computed from the
/// pre-count of the same filter.
#[derive(Debug, Clone)]
pub(crate) struct PostPage {
    pub(crate) posts: Vec<PostOverview>,
    pub(crate) total_pages: u64,
    pub(crate) show_pagination: bool,
}

/// A search either produces a page or short-circuits on a zero pre-count.
#[derive(Debug, Clone)]
pub(crate) enum SearchOutcome {
    NotFound { term: String },
    Page(PostPage),
}

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        actor: &CurrentUser,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let input = req.validate()?;

        let new_post = NewPost {
            title: input.title,
            content: input.content,
            author_id: actor.user_id,
            category_id: input.category_id,
        };
        self.repo.create_post(new_post).await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<PostOverview, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn update_post(
        &self,
        actor: &CurrentUser,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let input = req.validate()?;

        let existing = self.get_post(post_id).await?;
        policy::can_modify_post(actor, existing.post.author_id)?;

        let patch = PostPatch {
            title: input.title,
            content: input.content,
            category_id: input.category_id,
        };
        self.repo
            .update_post(post_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {post_id}")))
    }

    pub(crate) async fn set_published(
        &self,
        actor: &CurrentUser,
        post_id: i64,
        published: bool,
    ) -> Result<(), DomainError> {
        policy::can_publish_post(actor)?;

        let updated = self.repo.set_published(post_id, published).await?;
        if !updated {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn delete_post(
        &self,
        actor: &CurrentUser,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let existing = self.get_post(post_id).await?;
        policy::can_modify_post(actor, existing.post.author_id)?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        Ok(())
    }

    pub(crate) async fn list_published(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<PostPage, DomainError> {
        let total = self.repo.count_published().await?;
        let window = paginate(total, page, limit);
        let posts = self.repo.list_published(window.into()).await?;

        Ok(PostPage {
            posts,
            total_pages: window.total_pages,
            show_pagination: window.show_pagination,
        })
    }

    pub(crate) async fn list_by_category(
        &self,
        category_id: i64,
        page: u32,
        limit: u32,
    ) -> Result<PostPage, DomainError> {
        let total = self.repo.count_published_in_category(category_id).await?;
        let window = paginate(total, page, limit);
        let posts = self
            .repo
            .list_published_in_category(category_id, window.into())
            .await?;

        Ok(PostPage {
            posts,
            total_pages: window.total_pages,
            show_pagination: window.show_pagination,
        })
    }

    pub(crate) async fn search(
        &self,
        term: &str,
        page: u32,
        limit: u32,
    ) -> Result<SearchOutcome, DomainError> {
        let term = term.trim();

        let total = self.repo.count_title_matches(term).await?;
        if total == 0 {
            return Ok(SearchOutcome::NotFound {
                term: term.to_string(),
            });
        }

        let window = paginate(total, page, limit);
        let posts = self.repo.search_by_title(term, window.into()).await?;

        Ok(SearchOutcome::Page(PostPage {
            posts,
            total_pages: window.total_pages,
            show_pagination: window.show_pagination,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::{PostService, SearchOutcome};
    use crate::data::post_repository::{NewPost, PageSlice, PostPatch, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, Post, PostOverview, UpdatePostRequest};
    use crate::domain::user::{CurrentUser, Role};

    #[derive(Clone, Default)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        overview_for_get: Arc<Mutex<Option<PostOverview>>>,
        update_call: Arc<Mutex<Option<(i64, PostPatch)>>>,
        update_result: Arc<Mutex<Option<Post>>>,
        publish_call: Arc<Mutex<Option<(i64, bool)>>>,
        publish_result: Arc<Mutex<bool>>,
        delete_result: Arc<Mutex<bool>>,
        published_count: Arc<Mutex<i64>>,
        search_count: Arc<Mutex<i64>>,
        list_slice: Arc<Mutex<Option<PageSlice>>>,
        list_result: Arc<Mutex<Vec<PostOverview>>>,
        search_called: Arc<Mutex<bool>>,
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input.clone());
            Ok(sample_post(1, &input.title, input.author_id))
        }

        async fn get_post(&self, _id: i64) -> Result<Option<PostOverview>, DomainError> {
            Ok(self
                .overview_for_get
                .lock()
                .expect("overview mutex poisoned")
                .clone())
        }

        async fn update_post(
            &self,
            id: i64,
            patch: PostPatch,
        ) -> Result<Option<Post>, DomainError> {
            *self.update_call.lock().expect("update mutex poisoned") = Some((id, patch));
            Ok(self
                .update_result
                .lock()
                .expect("update result mutex poisoned")
                .clone())
        }

        async fn set_published(&self, id: i64, published: bool) -> Result<bool, DomainError> {
            *self.publish_call.lock().expect("publish mutex poisoned") = Some((id, published));
            Ok(*self
                .publish_result
                .lock()
                .expect("publish result mutex poisoned"))
        }

        async fn delete_post(&self, _id: i64) -> Result<bool, DomainError> {
            Ok(*self.delete_result.lock().expect("delete mutex poisoned"))
        }

        async fn count_published(&self) -> Result<i64, DomainError> {
            Ok(*self.published_count.lock().expect("count mutex poisoned"))
        }

        async fn list_published(&self, slice: PageSlice) -> Result<Vec<PostOverview>, DomainError> {
            *self.list_slice.lock().expect("slice mutex poisoned") = Some(slice);
            Ok(self.list_result.lock().expect("list mutex poisoned").clone())
        }

        async fn count_published_in_category(&self, _category_id: i64) -> Result<i64, DomainError> {
            Ok(*self.published_count.lock().expect("count mutex poisoned"))
        }

        async fn list_published_in_category(
            &self,
            _category_id: i64,
            slice: PageSlice,
        ) -> Result<Vec<PostOverview>, DomainError> {
            *self.list_slice.lock().expect("slice mutex poisoned") = Some(slice);
            Ok(self.list_result.lock().expect("list mutex poisoned").clone())
        }

        async fn count_title_matches(&self, _needle: &str) -> Result<i64, DomainError> {
            Ok(*self.search_count.lock().expect("count mutex poisoned"))
        }

        async fn search_by_title(
            &self,
            _needle: &str,
            _slice: PageSlice,
        ) -> Result<Vec<PostOverview>, DomainError> {
            *self.search_called.lock().expect("search mutex poisoned") = true;
            Ok(self.list_result.lock().expect("list mutex poisoned").clone())
        }
    }

    #[tokio::test]
    async fn create_post_stamps_the_actor_as_author() {
        let repo = FakePostRepo::default();
        let service = PostService::new(repo.clone());

        let req = CreatePostRequest {
            title: "  My first post  ".to_string(),
            content: "content long enough to pass validation".to_string(),
            category_id: Some(2),
        };

        let post = service
            .create_post(&actor(10, Role::Client), req)
            .await
            .expect("create must succeed");
        assert_eq!(post.author_id, 10);

        let input = repo
            .created_input
            .lock()
            .expect("created input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.title, "My first post");
        assert_eq!(input.category_id, 2);
    }

    #[tokio::test]
    async fn invalid_post_is_rejected_before_any_insert() {
        let repo = FakePostRepo::default();
        let service = PostService::new(repo.clone());

        let req = CreatePostRequest {
            title: "ab".to_string(),
            content: "content long enough to pass validation".to_string(),
            category_id: Some(2),
        };

        let err = service
            .create_post(&actor(10, Role::Client), req)
            .await
            .expect_err("must be rejected");
        match err {
            DomainError::Validation(errors) => assert_eq!(errors[0].field, "title"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(
            repo.created_input
                .lock()
                .expect("created input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn non_owner_update_is_denied_and_leaves_the_post_unchanged() {
        let repo = FakePostRepo::default();
        *repo
            .overview_for_get
            .lock()
            .expect("overview mutex poisoned") = Some(sample_overview(7, "title", 99));
        let service = PostService::new(repo.clone());

        let err = service
            .update_post(&actor(10, Role::Client), 7, update_request())
            .await
            .expect_err("must be denied");
        assert!(matches!(
            err,
            DomainError::Forbidden("you are not the author of this post")
        ));
        assert!(repo.update_call.lock().expect("update mutex poisoned").is_none());
    }

    #[tokio::test]
    async fn admin_updates_any_post() {
        let repo = FakePostRepo::default();
        *repo
            .overview_for_get
            .lock()
            .expect("overview mutex poisoned") = Some(sample_overview(7, "title", 99));
        *repo
            .update_result
            .lock()
            .expect("update result mutex poisoned") = Some(sample_post(7, "new title", 99));
        let service = PostService::new(repo);

        let updated = service
            .update_post(&actor(1, Role::Admin), 7, update_request())
            .await
            .expect("admin update must succeed");
        assert_eq!(updated.id, 7);
    }

    #[tokio::test]
    async fn publishing_is_admin_only() {
        let repo = FakePostRepo::default();
        *repo
            .publish_result
            .lock()
            .expect("publish result mutex poisoned") = true;
        let service = PostService::new(repo.clone());

        let err = service
            .set_published(&actor(10, Role::Client), 7, true)
            .await
            .expect_err("must be denied");
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert!(repo.publish_call.lock().expect("publish mutex poisoned").is_none());

        service
            .set_published(&actor(1, Role::Admin), 7, true)
            .await
            .expect("admin must publish");
        let call = repo
            .publish_call
            .lock()
            .expect("publish mutex poisoned")
            .clone()
            .expect("publish must be called");
        assert_eq!(call, (7, true));
    }

    #[tokio::test]
    async fn owner_deletes_their_own_post() {
        let repo = FakePostRepo::default();
        *repo
            .overview_for_get
            .lock()
            .expect("overview mutex poisoned") = Some(sample_overview(7, "title", 10));
        *repo.delete_result.lock().expect("delete mutex poisoned") = true;
        let service = PostService::new(repo);

        service
            .delete_post(&actor(10, Role::Client), 7)
            .await
            .expect("owner delete must succeed");
    }

    #[tokio::test]
    async fn list_published_feeds_the_count_into_the_window() {
        let repo = FakePostRepo::default();
        *repo.published_count.lock().expect("count mutex poisoned") = 10;
        *repo.list_result.lock().expect("list mutex poisoned") =
            vec![sample_overview(1, "a", 10)];
        let service = PostService::new(repo.clone());

        let page = service
            .list_published(2, 9)
            .await
            .expect("list must succeed");
        assert_eq!(page.total_pages, 2);
        assert!(page.show_pagination);

        let slice = repo
            .list_slice
            .lock()
            .expect("slice mutex poisoned")
            .clone()
            .expect("slice must be captured");
        assert_eq!(slice.limit, 9);
        assert_eq!(slice.offset, 9);
    }

    #[tokio::test]
    async fn search_with_no_matches_short_circuits() {
        let repo = FakePostRepo::default();
        *repo.search_count.lock().expect("count mutex poisoned") = 0;
        let service = PostService::new(repo.clone());

        let outcome = service
            .search("nothing", 1, 9)
            .await
            .expect("search must succeed");
        match outcome {
            SearchOutcome::NotFound { term } => assert_eq!(term, "nothing"),
            SearchOutcome::Page(_) => panic!("expected the not-found outcome"),
        }
        assert!(!*repo.search_called.lock().expect("search mutex poisoned"));
    }

    #[tokio::test]
    async fn search_with_matches_returns_a_page() {
        let repo = FakePostRepo::default();
        *repo.search_count.lock().expect("count mutex poisoned") = 1;
        *repo.list_result.lock().expect("list mutex poisoned") =
            vec![sample_overview(1, "rust post", 10)];
        let service = PostService::new(repo);

        let outcome = service
            .search("rust", 1, 9)
            .await
            .expect("search must succeed");
        match outcome {
            SearchOutcome::Page(page) => {
                assert_eq!(page.posts.len(), 1);
                assert_eq!(page.total_pages, 1);
                assert!(!page.show_pagination);
            }
            SearchOutcome::NotFound { .. } => panic!("expected a result page"),
        }
    }

    fn actor(user_id: i64, role: Role) -> CurrentUser {
        CurrentUser {
            user_id,
            username: format!("user{user_id}"),
            role,
            is_active: true,
            email: format!("user{user_id}@example.com"),
        }
    }

    fn update_request() -> UpdatePostRequest {
        UpdatePostRequest {
            title: "updated title".to_string(),
            content: "updated content long enough to pass".to_string(),
            category_id: Some(2),
        }
    }

    fn sample_post(id: i64, title: &str, author_id: i64) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: "content long enough to pass validation".to_string(),
            author_id,
            category_id: Some(2),
            published: true,
            created_at: Utc::now(),
        }
    }

    fn sample_overview(id: i64, title: &str, author_id: i64) -> PostOverview {
        PostOverview {
            post: sample_post(id, title, author_id),
            author: format!("user{author_id}"),
            category_title: Some("Tech".to_string()),
        }
    }
}
