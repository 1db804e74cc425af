use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! impl_ids {
    ( $( $type:ident ),* $(,)? ) => {
        $(
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $type(pub Uuid);

        impl $type {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Display for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $type {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
        )*
    };
}
impl_ids!(BlogId, UserId);

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// Owner of the post.
    pub user: UserId,
}

/// A registered account.
///
/// `blogs` lists the posts this user created, oldest first. The password hash
/// is part of the stored record only and never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub password_hash: String,
    #[serde(default)]
    pub blogs: Vec<BlogId>,
}

/// A loose blog record as found in exported JSON files.
///
/// Only the fields the statistics need are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlogEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub likes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_forms() {
        let id: BlogId = "5A422A85-1B54-4A67-8234-D17F71B54A67".parse().unwrap();
        assert_eq!(id.to_string(), "5a422a85-1b54-4a67-8234-d17f71b54a67");

        let simple: BlogId = "5a422a851b54a6768234d17f71b54a67".parse().unwrap();
        assert_eq!(id, simple);

        assert!("1234567890".parse::<BlogId>().is_err());
    }

    #[test]
    fn test_blog_defaults() {
        let user = UserId::generate();
        let json = format!(
            r#"{{"id":"{}","title":"React patterns","url":"https://reactpatterns.com/","user":"{}"}}"#,
            BlogId::generate(),
            user
        );

        let blog: Blog = serde_json::from_str(&json).unwrap();
        assert_eq!(blog.likes, 0);
        assert_eq!(blog.author, "");
        assert_eq!(blog.user, user);
    }
}
