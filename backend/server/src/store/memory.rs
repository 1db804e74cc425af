use std::sync::Arc;

use async_trait::async_trait;
use blogs::models::{Blog, BlogId, User, UserId};
use tokio::sync::RwLock;

use crate::{error::AppResult, store::BlogStore};

#[derive(Debug, Default)]
struct Records {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> AppResult<bool> {
        let mut records = self.records.write().await;

        if records.users.iter().any(|u| u.username == user.username) {
            return Ok(false);
        }

        records.users.push(User {
            blogs: Vec::new(),
            ..user.clone()
        });

        Ok(true)
    }

    async fn user(&self, id: &UserId) -> AppResult<Option<User>> {
        let records = self.records.read().await;
        Ok(records.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let records = self.records.read().await;
        Ok(records.users.iter().find(|u| u.username == username).cloned())
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        Ok(self.records.read().await.users.clone())
    }

    async fn insert_blog(&self, blog: &Blog) -> AppResult<()> {
        let mut records = self.records.write().await;

        if let Some(owner) = records.users.iter_mut().find(|u| u.id == blog.user) {
            owner.blogs.push(blog.id);
        }
        records.blogs.push(blog.clone());

        Ok(())
    }

    async fn blog(&self, id: &BlogId) -> AppResult<Option<Blog>> {
        let records = self.records.read().await;
        Ok(records.blogs.iter().find(|b| b.id == *id).cloned())
    }

    async fn blogs(&self) -> AppResult<Vec<Blog>> {
        Ok(self.records.read().await.blogs.clone())
    }

    async fn update_blog(&self, blog: &Blog, likes: Option<u64>) -> AppResult<Option<Blog>> {
        let mut records = self.records.write().await;

        Ok(records.blogs.iter_mut().find(|b| b.id == blog.id).map(|stored| {
            stored.title = blog.title.clone();
            stored.author = blog.author.clone();
            stored.url = blog.url.clone();
            if let Some(likes) = likes {
                stored.likes = likes;
            }
            stored.clone()
        }))
    }

    async fn like_blog(&self, id: &BlogId) -> AppResult<Option<Blog>> {
        let mut records = self.records.write().await;

        Ok(records.blogs.iter_mut().find(|b| b.id == *id).map(|blog| {
            blog.likes = blog.likes.saturating_add(1);
            blog.clone()
        }))
    }

    async fn delete_blog(&self, id: &BlogId) -> AppResult<bool> {
        let mut records = self.records.write().await;

        let Some(index) = records.blogs.iter().position(|b| b.id == *id) else {
            return Ok(false);
        };
        let blog = records.blogs.remove(index);

        if let Some(owner) = records.users.iter_mut().find(|u| u.id == blog.user) {
            owner.blogs.retain(|b| b != id);
        }

        Ok(true)
    }

    async fn clear(&self) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.users.clear();
        records.blogs.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        User {
            id: UserId::generate(),
            username: username.to_string(),
            name: "Superuser".to_string(),
            password_hash: "hash".to_string(),
            blogs: Vec::new(),
        }
    }

    fn blog(owner: &User, title: &str) -> Blog {
        Blog {
            id: BlogId::generate(),
            title: title.to_string(),
            author: "Michael Chan".to_string(),
            url: "https://reactpatterns.com/".to_string(),
            likes: 0,
            user: owner.id,
        }
    }

    #[tokio::test]
    async fn test_unique_username() {
        let store = MemoryStore::new();

        assert!(store.insert_user(&user("root")).await.unwrap());
        assert!(!store.insert_user(&user("root")).await.unwrap());
        assert_eq!(store.users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blog_lifecycle() {
        let store = MemoryStore::new();
        let root = user("root");
        store.insert_user(&root).await.unwrap();

        let first = blog(&root, "React patterns");
        let second = blog(&root, "Type wars");
        store.insert_blog(&first).await.unwrap();
        store.insert_blog(&second).await.unwrap();

        let owner = store.user(&root.id).await.unwrap().unwrap();
        assert_eq!(owner.blogs, vec![first.id, second.id]);

        let liked = store.like_blog(&first.id).await.unwrap().unwrap();
        assert_eq!(liked.likes, 1);

        assert!(store.delete_blog(&first.id).await.unwrap());
        assert!(!store.delete_blog(&first.id).await.unwrap());

        let owner = store.user_by_username("root").await.unwrap().unwrap();
        assert_eq!(owner.blogs, vec![second.id]);
        assert_eq!(store.blogs().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = MemoryStore::new();
        let root = user("root");

        let missing = blog(&root, "missing");
        assert!(store.update_blog(&missing, None).await.unwrap().is_none());
        assert!(store.like_blog(&BlogId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_concurrent_likes() {
        let store = MemoryStore::new();
        let root = user("root");
        store.insert_user(&root).await.unwrap();

        let original = blog(&root, "React patterns");
        store.insert_blog(&original).await.unwrap();

        let read = store.blog(&original.id).await.unwrap().unwrap();
        store.like_blog(&original.id).await.unwrap();

        let edited = Blog {
            title: "React patterns, 2nd edition".to_string(),
            ..read
        };
        let stored = store.update_blog(&edited, None).await.unwrap().unwrap();
        assert_eq!(stored.title, "React patterns, 2nd edition");
        assert_eq!(stored.likes, 1);

        let stored = store.update_blog(&edited, Some(10)).await.unwrap().unwrap();
        assert_eq!(stored.likes, 10);
        assert_eq!(store.blog(&original.id).await.unwrap().unwrap().likes, 10);
    }
}
