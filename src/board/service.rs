//! Board services for corkboard.
//!
//! High-level post and comment operations composing validation, existence
//! checks, and the ownership guard on top of the repositories. Handlers call
//! these; repositories stay free of business rules.

use crate::auth::require_owner;
use crate::db::UserRepository;
use crate::{BoardError, Database, Result};

use super::comment::{Comment, CommentDetail, NewComment};
use super::comment_repository::CommentRepository;
use super::post::{NewPost, Post, PostDetail, PostListing, PostUpdate};
use super::post_repository::PostRepository;

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for post bodies (in characters).
pub const MAX_BODY_LENGTH: usize = 50_000;

/// Maximum length for comment bodies (in characters).
pub const MAX_COMMENT_LENGTH: usize = 1_000;

/// Maximum number of posts per page.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Hard cap on search results.
pub const SEARCH_RESULT_LIMIT: i64 = 100;

/// Default number of entries for the recent/popular rankings.
pub const DEFAULT_RANKING_LIMIT: u32 = 5;

/// Validate a post title.
fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BoardError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BoardError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a post body.
fn validate_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(BoardError::Validation("body must not be empty".to_string()));
    }
    if body.chars().count() > MAX_BODY_LENGTH {
        return Err(BoardError::Validation(format!(
            "body must be at most {MAX_BODY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a comment body.
fn validate_comment_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(BoardError::Validation(
            "comment must not be empty".to_string(),
        ));
    }
    if body.chars().count() > MAX_COMMENT_LENGTH {
        return Err(BoardError::Validation(format!(
            "comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Clamp a page number and page size to their valid ranges.
///
/// Out-of-range values are clamped rather than rejected, applied uniformly
/// to every paginated and ranked query.
pub fn clamp_page(page: u32, limit: u32) -> (u32, u32) {
    (page.max(1), limit.clamp(1, MAX_PAGE_LIMIT))
}

/// One page of a paginated query.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: i64,
    /// Current page number (1-based).
    pub page: u32,
    /// Page size used for this query.
    pub limit: u32,
    /// Total number of pages (`ceil(total / limit)`).
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page, deriving the total page count.
    pub fn new(items: Vec<T>, total: i64, page: u32, limit: u32) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            ((total + limit as i64 - 1) / limit as i64) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Service for post operations.
pub struct PostService<'a> {
    db: &'a Database,
}

impl<'a> PostService<'a> {
    /// Create a new PostService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a post owned by `author_id`.
    pub async fn create(&self, author_id: &str, title: &str, body: &str) -> Result<Post> {
        validate_title(title)?;
        validate_body(body)?;

        let users = UserRepository::new(self.db.pool());
        if !users.exists(author_id).await? {
            return Err(BoardError::NotFound("user".to_string()));
        }

        let post = PostRepository::new(self.db.pool())
            .create(&NewPost::new(title, body, author_id))
            .await?;

        tracing::info!(post_id = post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// Fetch a post for display, bumping its view counter first.
    pub async fn get(&self, post_id: i64) -> Result<PostDetail> {
        let repo = PostRepository::new(self.db.pool());

        if !repo.increment_views(post_id).await? {
            return Err(BoardError::NotFound("post".to_string()));
        }

        repo.get_detail(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// List posts, newest first, with pagination.
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<PostListing>> {
        let (page, limit) = clamp_page(page, limit);
        let offset = (page as i64 - 1) * limit as i64;

        let repo = PostRepository::new(self.db.pool());
        let items = repo.list(offset, limit as i64).await?;
        let total = repo.count().await?;

        Ok(Page::new(items, total, page, limit))
    }

    /// List a user's posts, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<PostListing>> {
        let users = UserRepository::new(self.db.pool());
        if !users.exists(user_id).await? {
            return Err(BoardError::NotFound("user".to_string()));
        }

        PostRepository::new(self.db.pool()).list_by_user(user_id).await
    }

    /// Update a post's supplied fields. Only the owner may update.
    pub async fn update(&self, post_id: i64, update: PostUpdate, user_id: &str) -> Result<Post> {
        if update.is_empty() {
            return Err(BoardError::Validation("nothing to update".to_string()));
        }
        if let Some(ref title) = update.title {
            validate_title(title)?;
        }
        if let Some(ref body) = update.body {
            validate_body(body)?;
        }

        let repo = PostRepository::new(self.db.pool());
        let post = repo
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;

        require_owner(&post.author_id, user_id)?;

        let updated = repo
            .update(post_id, &update)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;

        tracing::info!(post_id = post_id, user_id = %user_id, "Post updated");
        Ok(updated)
    }

    /// Delete a post and its comments. Only the owner may delete.
    pub async fn delete(&self, post_id: i64, user_id: &str) -> Result<()> {
        let repo = PostRepository::new(self.db.pool());
        let post = repo
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;

        require_owner(&post.author_id, user_id)?;

        repo.delete(post_id).await?;
        tracing::info!(post_id = post_id, user_id = %user_id, "Post deleted");
        Ok(())
    }

    /// Search posts by keyword over title or body, newest first.
    pub async fn search(&self, keyword: &str) -> Result<Vec<PostListing>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(BoardError::Validation(
                "search keyword must not be empty".to_string(),
            ));
        }

        PostRepository::new(self.db.pool())
            .search(keyword, SEARCH_RESULT_LIMIT)
            .await
    }

    /// List the newest posts.
    pub async fn recent(&self, limit: u32) -> Result<Vec<PostListing>> {
        let (_, limit) = clamp_page(1, limit);
        PostRepository::new(self.db.pool()).list(0, limit as i64).await
    }

    /// List the most-commented posts, newest first among ties.
    pub async fn popular(&self, limit: u32) -> Result<Vec<PostListing>> {
        let (_, limit) = clamp_page(1, limit);
        PostRepository::new(self.db.pool()).popular(limit as i64).await
    }
}

/// Service for comment operations.
pub struct CommentService<'a> {
    db: &'a Database,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a comment on a post.
    pub async fn create(&self, author_id: &str, post_id: i64, body: &str) -> Result<Comment> {
        validate_comment_body(body)?;

        let users = UserRepository::new(self.db.pool());
        if !users.exists(author_id).await? {
            return Err(BoardError::NotFound("user".to_string()));
        }

        let posts = PostRepository::new(self.db.pool());
        if posts.get_by_id(post_id).await?.is_none() {
            return Err(BoardError::NotFound("post".to_string()));
        }

        let comment = CommentRepository::new(self.db.pool())
            .create(&NewComment::new(body, author_id, post_id))
            .await?;

        tracing::info!(
            comment_id = comment.id,
            post_id = post_id,
            author_id = %author_id,
            "Comment created"
        );
        Ok(comment)
    }

    /// Fetch a comment for display.
    pub async fn get(&self, comment_id: i64) -> Result<CommentDetail> {
        CommentRepository::new(self.db.pool())
            .get_detail(comment_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))
    }

    /// List comments on a post, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<CommentDetail>> {
        let posts = PostRepository::new(self.db.pool());
        if posts.get_by_id(post_id).await?.is_none() {
            return Err(BoardError::NotFound("post".to_string()));
        }

        CommentRepository::new(self.db.pool()).list_by_post(post_id).await
    }

    /// List a user's comments, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<CommentDetail>> {
        let users = UserRepository::new(self.db.pool());
        if !users.exists(user_id).await? {
            return Err(BoardError::NotFound("user".to_string()));
        }

        CommentRepository::new(self.db.pool()).list_by_user(user_id).await
    }

    /// Update a comment's body. Only the owner may update.
    pub async fn update(&self, comment_id: i64, body: &str, user_id: &str) -> Result<Comment> {
        validate_comment_body(body)?;

        let repo = CommentRepository::new(self.db.pool());
        let comment = repo
            .get_by_id(comment_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))?;

        require_owner(&comment.author_id, user_id)?;

        let updated = repo
            .update(comment_id, body)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))?;

        tracing::info!(comment_id = comment_id, user_id = %user_id, "Comment updated");
        Ok(updated)
    }

    /// Delete a comment. Only the owner may delete.
    pub async fn delete(&self, comment_id: i64, user_id: &str) -> Result<()> {
        let repo = CommentRepository::new(self.db.pool());
        let comment = repo
            .get_by_id(comment_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))?;

        require_owner(&comment.author_id, user_id)?;

        repo.delete(comment_id).await?;
        tracing::info!(comment_id = comment_id, user_id = %user_id, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewUser;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        users
            .create(&NewUser::new("alice", "Alice", "hash"))
            .await
            .unwrap();
        users
            .create(&NewUser::new("bob", "Bob", "hash"))
            .await
            .unwrap();
        db
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 10), (1, 10));
        assert_eq!(clamp_page(3, 0), (3, 1));
        assert_eq!(clamp_page(1, 500), (1, 100));
        assert_eq!(clamp_page(2, 25), (2, 25));
    }

    #[test]
    fn test_page_total_pages() {
        let page = Page::new(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(page.total_pages, 3);

        let page = Page::new(Vec::<i32>::new(), 0, 1, 10);
        assert_eq!(page.total_pages, 0);

        let page = Page::new(vec![1], 10, 1, 10);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_create_post_validates_input() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let result = service.create("alice", "   ", "body").await;
        assert!(matches!(result, Err(BoardError::Validation(_))));

        let long_title = "a".repeat(MAX_TITLE_LENGTH + 1);
        let result = service.create("alice", &long_title, "body").await;
        assert!(matches!(result, Err(BoardError::Validation(_))));

        let long_body = "a".repeat(MAX_BODY_LENGTH + 1);
        let result = service.create("alice", "title", &long_body).await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_post_unknown_user() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let result = service.create("ghost", "title", "body").await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_increments_view_count() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let post = service.create("alice", "title", "body").await.unwrap();
        assert_eq!(post.view_count, 0);

        let first = service.get(post.id).await.unwrap();
        let second = service.get(post.id).await.unwrap();

        assert_eq!(first.view_count, 1);
        assert_eq!(second.view_count, 2);
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let result = service.get(999).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_pagination_totals() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        for i in 0..25 {
            service
                .create("alice", &format!("Post {i}"), "body")
                .await
                .unwrap();
        }

        let page = service.list(1, 10).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);

        let last = service.list(3, 10).await.unwrap();
        assert_eq!(last.items.len(), 5);
    }

    #[tokio::test]
    async fn test_list_clamps_out_of_range() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        service.create("alice", "only", "post").await.unwrap();

        let page = service.list(0, 500).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let post = service.create("alice", "title", "body").await.unwrap();
        let updated = service
            .update(post.id, PostUpdate::new().title("changed"), "alice")
            .await
            .unwrap();

        assert_eq!(updated.title, "changed");
        assert_eq!(updated.body, "body");
    }

    #[tokio::test]
    async fn test_update_by_non_owner_leaves_post_unchanged() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let post = service.create("alice", "title", "body").await.unwrap();
        let result = service
            .update(post.id, PostUpdate::new().title("hijack"), "bob")
            .await;
        assert!(matches!(result, Err(BoardError::Forbidden(_))));

        let unchanged = PostRepository::new(db.pool())
            .get_by_id(post.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.title, "title");
    }

    #[tokio::test]
    async fn test_update_empty_is_rejected() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let post = service.create("alice", "title", "body").await.unwrap();
        let result = service.update(post.id, PostUpdate::new(), "alice").await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let result = service
            .update(999, PostUpdate::new().title("x"), "alice")
            .await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_comments() {
        let db = setup_db().await;
        let posts = PostService::new(&db);
        let comments = CommentService::new(&db);

        let post = posts.create("alice", "title", "body").await.unwrap();
        let c1 = comments.create("bob", post.id, "one").await.unwrap();
        let c2 = comments.create("bob", post.id, "two").await.unwrap();

        posts.delete(post.id, "alice").await.unwrap();

        assert!(matches!(
            comments.get(c1.id).await,
            Err(BoardError::NotFound(_))
        ));
        assert!(matches!(
            comments.get(c2.id).await,
            Err(BoardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_by_non_owner() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        let post = service.create("alice", "title", "body").await.unwrap();
        let result = service.delete(post.id, "bob").await;
        assert!(matches!(result, Err(BoardError::Forbidden(_))));

        // Still there
        assert!(service.get(post.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_search_matches_body_only_keyword() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        service
            .create("alice", "plain title", "hidden gemstone inside")
            .await
            .unwrap();

        let hits = service.search("gemstone").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "plain title");
    }

    #[tokio::test]
    async fn test_search_empty_keyword() {
        let db = setup_db().await;
        let service = PostService::new(&db);

        assert!(matches!(
            service.search("").await,
            Err(BoardError::Validation(_))
        ));
        assert!(matches!(
            service.search("   ").await,
            Err(BoardError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_recent_and_popular() {
        let db = setup_db().await;
        let posts = PostService::new(&db);
        let comments = CommentService::new(&db);

        let p1 = posts.create("alice", "first", "body").await.unwrap();
        let p2 = posts.create("alice", "second", "body").await.unwrap();
        comments.create("bob", p1.id, "hello").await.unwrap();

        let recent = posts.recent(10).await.unwrap();
        assert_eq!(recent[0].id, p2.id);
        assert_eq!(recent[1].id, p1.id);

        let popular = posts.popular(10).await.unwrap();
        assert_eq!(popular[0].id, p1.id);
        assert_eq!(popular[1].id, p2.id);
    }

    #[tokio::test]
    async fn test_comment_create_checks_post_and_user() {
        let db = setup_db().await;
        let posts = PostService::new(&db);
        let comments = CommentService::new(&db);

        let result = comments.create("alice", 999, "body").await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));

        let post = posts.create("alice", "title", "body").await.unwrap();
        let result = comments.create("ghost", post.id, "body").await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));

        let comment = comments.create("bob", post.id, "body").await.unwrap();
        assert_eq!(comment.author_id, "bob");
    }

    #[tokio::test]
    async fn test_comment_validates_body() {
        let db = setup_db().await;
        let posts = PostService::new(&db);
        let comments = CommentService::new(&db);

        let post = posts.create("alice", "title", "body").await.unwrap();

        let result = comments.create("bob", post.id, "  ").await;
        assert!(matches!(result, Err(BoardError::Validation(_))));

        let long = "a".repeat(MAX_COMMENT_LENGTH + 1);
        let result = comments.create("bob", post.id, &long).await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
    }

    #[tokio::test]
    async fn test_comment_ownership_checks() {
        let db = setup_db().await;
        let posts = PostService::new(&db);
        let comments = CommentService::new(&db);

        let post = posts.create("alice", "title", "body").await.unwrap();
        let comment = comments.create("bob", post.id, "mine").await.unwrap();

        // Post owner is not comment owner
        let result = comments.update(comment.id, "edited", "alice").await;
        assert!(matches!(result, Err(BoardError::Forbidden(_))));

        let result = comments.delete(comment.id, "alice").await;
        assert!(matches!(result, Err(BoardError::Forbidden(_))));

        let updated = comments.update(comment.id, "edited", "bob").await.unwrap();
        assert_eq!(updated.body, "edited");

        comments.delete(comment.id, "bob").await.unwrap();
        assert!(matches!(
            comments.get(comment.id).await,
            Err(BoardError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_comment_list_by_post_checks_post() {
        let db = setup_db().await;
        let comments = CommentService::new(&db);

        let result = comments.list_by_post(999).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_comment_list_by_user_checks_user() {
        let db = setup_db().await;
        let comments = CommentService::new(&db);

        let result = comments.list_by_user("ghost").await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));

        let listed = comments.list_by_user("alice").await.unwrap();
        assert!(listed.is_empty());
    }
}
