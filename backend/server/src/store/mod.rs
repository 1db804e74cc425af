use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use blogs::models::{Blog, BlogId, User, UserId};

use crate::error::AppResult;

/// In-memory store implementation.
pub mod memory;

/// Persistence of users and their blogs.
///
/// Listing methods return records in creation order. A user's `blogs` always reflects the
/// blogs currently stored for them.
#[async_trait]
pub trait BlogStore: Debug {
    /// Inserts a user unless the username is taken.
    ///
    /// # Returns
    ///
    /// Returns `false` when another user already holds the username.
    async fn insert_user(&self, user: &User) -> AppResult<bool>;

    async fn user(&self, id: &UserId) -> AppResult<Option<User>>;

    async fn user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn users(&self) -> AppResult<Vec<User>>;

    /// Inserts a blog and appends it to its owner's list.
    async fn insert_blog(&self, blog: &Blog) -> AppResult<()>;

    async fn blog(&self, id: &BlogId) -> AppResult<Option<Blog>>;

    async fn blogs(&self) -> AppResult<Vec<Blog>>;

    /// Replaces the title, author and url of an existing blog.
    ///
    /// The like count is only overwritten when `likes` is given, `blog.likes` is ignored.
    ///
    /// # Returns
    ///
    /// Returns the stored blog with its current likes, `None` if not found.
    async fn update_blog(&self, blog: &Blog, likes: Option<u64>) -> AppResult<Option<Blog>>;

    /// Adds one like.
    ///
    /// # Returns
    ///
    /// Returns the updated blog, `None` if not found.
    async fn like_blog(&self, id: &BlogId) -> AppResult<Option<Blog>>;

    /// Deletes a blog and removes it from its owner's list.
    ///
    /// # Returns
    ///
    /// Returns `true` if a record was deleted, `false` if not found.
    async fn delete_blog(&self, id: &BlogId) -> AppResult<bool>;

    /// Removes every user and blog.
    async fn clear(&self) -> AppResult<()>;
}

pub type BlogStoreArc = Arc<dyn BlogStore + Send + Sync>;
