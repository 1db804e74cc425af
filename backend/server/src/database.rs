//! # Redis
//!
//! Document store for users and blogs.
//!
//! ## Layout
//!
//! - `users`: hash of user id to user JSON (without the blog list)
//! - `usernames`: hash of username to user id, claimed with `HSETNX` so uniqueness holds under races
//! - `blogs`: hash of blog id to blog JSON
//! - `blog_likes`: hash of blog id to **likes** int, the source of truth for likes
//! - `blog_order`: list of blog ids in creation order
//! - `user_blogs:{id}`: list of blog ids owned by a user
//!
//! ## Implementation
//!
//! - Likes live in their own hash so likes are atomic `HINCRBY`s
//! - Writes touching several keys go through `MULTI` pipelines
//! - Writes that depend on the blog still existing run as Lua scripts
//! - Blog JSON is read back and merged with `blog_likes`, its own `likes` field is stale
use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use blogs::models::{Blog, BlogId, User, UserId};
use redis::{
    AsyncCommands, Client, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
    pipe,
};
use tracing::debug;

use crate::{error::AppResult, store::BlogStore};

const USERS: &str = "users";
const USERNAMES: &str = "usernames";
const BLOGS: &str = "blogs";
const BLOG_LIKES: &str = "blog_likes";
const BLOG_ORDER: &str = "blog_order";

/// `KEYS`: blogs, blog_likes. `ARGV`: blog id. Returns `[json, likes]` or nil.
const LIKE_SCRIPT: &str = r"
local json = redis.call('HGET', KEYS[1], ARGV[1])
if not json then
    return false
end
return { json, redis.call('HINCRBY', KEYS[2], ARGV[1], 1) }
";

/// `KEYS`: blogs, blog_likes. `ARGV`: blog id, blog json, optional likes. Returns likes or nil.
const UPDATE_SCRIPT: &str = r"
if redis.call('HEXISTS', KEYS[1], ARGV[1]) == 0 then
    return false
end
redis.call('HSET', KEYS[1], ARGV[1], ARGV[2])
if ARGV[3] then
    redis.call('HSET', KEYS[2], ARGV[1], ARGV[3])
end
return tonumber(redis.call('HGET', KEYS[2], ARGV[1]) or '0')
";

fn user_blogs_key(id: &UserId) -> String {
    format!("user_blogs:{id}")
}

pub async fn init_redis(redis_url: &str) -> AppResult<ConnectionManager> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;
    let connection_manager = client.get_connection_manager_with_config(config).await?;

    Ok(connection_manager)
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    like_script: Script,
    update_script: Script,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish()
    }
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection,
            like_script: Script::new(LIKE_SCRIPT),
            update_script: Script::new(UPDATE_SCRIPT),
        }
    }

    async fn load_user(&self, json: &str) -> AppResult<User> {
        let mut user: User = serde_json::from_str(json)?;
        let ids: Vec<String> = self
            .connection
            .clone()
            .lrange(user_blogs_key(&user.id), 0, -1)
            .await?;

        user.blogs = ids.iter().filter_map(|id| id.parse().ok()).collect();

        Ok(user)
    }

    async fn likes(&self, id: &BlogId) -> AppResult<u64> {
        let likes: Option<i64> = self
            .connection
            .clone()
            .hget(BLOG_LIKES, id.to_string())
            .await?;

        Ok(likes.unwrap_or(0).max(0) as u64)
    }
}

#[async_trait]
impl BlogStore for RedisStore {
    async fn insert_user(&self, user: &User) -> AppResult<bool> {
        let mut connection = self.connection.clone();
        let id = user.id.to_string();

        let claimed: bool = connection.hset_nx(USERNAMES, &user.username, &id).await?;
        if !claimed {
            debug!("Username {} already taken", user.username);
            return Ok(false);
        }

        let stored = User {
            blogs: Vec::new(),
            ..user.clone()
        };
        let _: () = connection
            .hset(USERS, &id, serde_json::to_string(&stored)?)
            .await?;

        Ok(true)
    }

    async fn user(&self, id: &UserId) -> AppResult<Option<User>> {
        let json: Option<String> = self.connection.clone().hget(USERS, id.to_string()).await?;

        match json {
            Some(json) => Ok(Some(self.load_user(&json).await?)),
            None => Ok(None),
        }
    }

    async fn user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let id: Option<String> = self.connection.clone().hget(USERNAMES, username).await?;

        match id.and_then(|id| id.parse::<UserId>().ok()) {
            Some(id) => self.user(&id).await,
            None => Ok(None),
        }
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        let stored: HashMap<String, String> = self.connection.clone().hgetall(USERS).await?;

        let mut users = Vec::with_capacity(stored.len());
        for json in stored.values() {
            users.push(self.load_user(json).await?);
        }
        users.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(users)
    }

    async fn insert_blog(&self, blog: &Blog) -> AppResult<()> {
        let id = blog.id.to_string();

        let _: () = pipe()
            .atomic()
            .hset(BLOGS, &id, serde_json::to_string(blog)?)
            .ignore()
            .hset(BLOG_LIKES, &id, blog.likes)
            .ignore()
            .rpush(BLOG_ORDER, &id)
            .ignore()
            .rpush(user_blogs_key(&blog.user), &id)
            .ignore()
            .query_async(&mut self.connection.clone())
            .await?;

        Ok(())
    }

    async fn blog(&self, id: &BlogId) -> AppResult<Option<Blog>> {
        let json: Option<String> = self.connection.clone().hget(BLOGS, id.to_string()).await?;

        let Some(json) = json else {
            return Ok(None);
        };
        let mut blog: Blog = serde_json::from_str(&json)?;
        blog.likes = self.likes(id).await?;

        Ok(Some(blog))
    }

    async fn blogs(&self) -> AppResult<Vec<Blog>> {
        let mut connection = self.connection.clone();

        let order: Vec<String> = connection.lrange(BLOG_ORDER, 0, -1).await?;
        let stored: HashMap<String, String> = connection.hgetall(BLOGS).await?;
        let likes: HashMap<String, i64> = connection.hgetall(BLOG_LIKES).await?;

        let mut blogs = Vec::with_capacity(order.len());
        for id in order {
            let Some(json) = stored.get(&id) else {
                continue;
            };
            let mut blog: Blog = serde_json::from_str(json)?;
            blog.likes = likes.get(&id).copied().unwrap_or(0).max(0) as u64;
            blogs.push(blog);
        }

        Ok(blogs)
    }

    async fn update_blog(&self, blog: &Blog, likes: Option<u64>) -> AppResult<Option<Blog>> {
        let mut invocation = self.update_script.prepare_invoke();
        invocation
            .key(BLOGS)
            .key(BLOG_LIKES)
            .arg(blog.id.to_string())
            .arg(serde_json::to_string(blog)?);
        if let Some(likes) = likes {
            invocation.arg(likes);
        }

        let stored: Option<i64> = invocation
            .invoke_async(&mut self.connection.clone())
            .await?;

        Ok(stored.map(|likes| Blog {
            likes: likes.max(0) as u64,
            ..blog.clone()
        }))
    }

    async fn like_blog(&self, id: &BlogId) -> AppResult<Option<Blog>> {
        let liked: Option<(String, i64)> = self
            .like_script
            .key(BLOGS)
            .key(BLOG_LIKES)
            .arg(id.to_string())
            .invoke_async(&mut self.connection.clone())
            .await?;

        let Some((json, likes)) = liked else {
            return Ok(None);
        };

        let mut blog: Blog = serde_json::from_str(&json)?;
        blog.likes = likes.max(0) as u64;

        Ok(Some(blog))
    }

    async fn delete_blog(&self, id: &BlogId) -> AppResult<bool> {
        let Some(blog) = self.blog(id).await? else {
            return Ok(false);
        };
        let key = id.to_string();

        let (deleted,): (i64,) = pipe()
            .atomic()
            .hdel(BLOGS, &key)
            .hdel(BLOG_LIKES, &key)
            .ignore()
            .lrem(BLOG_ORDER, 0, &key)
            .ignore()
            .lrem(user_blogs_key(&blog.user), 0, &key)
            .ignore()
            .query_async(&mut self.connection.clone())
            .await?;

        Ok(deleted > 0)
    }

    async fn clear(&self) -> AppResult<()> {
        let mut connection = self.connection.clone();

        let user_ids: Vec<String> = connection.hkeys(USERS).await?;
        let mut keys: Vec<String> = user_ids
            .iter()
            .filter_map(|id| id.parse::<UserId>().ok())
            .map(|id| user_blogs_key(&id))
            .collect();
        keys.extend([USERS, USERNAMES, BLOGS, BLOG_LIKES, BLOG_ORDER].map(String::from));

        let _: () = connection.del(keys).await?;

        Ok(())
    }
}
