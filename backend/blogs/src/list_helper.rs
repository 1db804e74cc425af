//! # Blog Statistics
//!
//! Single pass folds over a list of blogs.
//!
//! ## Ties
//!
//! - `favorite_blog` keeps the first blog holding the maximum likes
//! - `most_blogs`/`most_likes` group authors in the order they first appear, then keep
//!   the first author reaching the maximum
//!
//! Results only depend on the multiset of blogs up to that tie-break.
//!
//! ## Empty Input
//!
//! `total_likes` is `0`, everything else is `None`.
//!
//! Like sums saturate at `u64::MAX`.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Blog, BlogEntry};

/// Anything that can be counted as a blog post.
pub trait Post {
    fn title(&self) -> &str;

    fn author(&self) -> &str;

    fn likes(&self) -> u64;
}

impl Post for Blog {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

impl Post for BlogEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// All statistics at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub total_blogs: usize,
    pub total_likes: u64,
    pub favorite_blog: Option<FavoriteBlog>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

pub fn total_likes<P: Post>(blogs: &[P]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |total, blog| total.saturating_add(blog.likes()))
}

pub fn favorite_blog<P: Post>(blogs: &[P]) -> Option<&P> {
    let (first, rest) = blogs.split_first()?;

    Some(rest.iter().fold(first, |max, blog| {
        if blog.likes() > max.likes() {
            blog
        } else {
            max
        }
    }))
}

pub fn most_blogs<P: Post>(blogs: &[P]) -> Option<AuthorBlogs> {
    let (author, blogs) = max_by_author(blogs, |count: usize, _| count + 1)?;

    Some(AuthorBlogs {
        author: author.to_string(),
        blogs,
    })
}

pub fn most_likes<P: Post>(blogs: &[P]) -> Option<AuthorLikes> {
    let (author, likes) = max_by_author(blogs, |total: u64, blog| {
        total.saturating_add(blog.likes())
    })?;

    Some(AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

pub fn summarize<P: Post>(blogs: &[P]) -> BlogSummary {
    BlogSummary {
        total_blogs: blogs.len(),
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs).map(|blog| FavoriteBlog {
            title: blog.title().to_string(),
            author: blog.author().to_string(),
            likes: blog.likes(),
        }),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

fn max_by_author<P, W, F>(blogs: &[P], tally: F) -> Option<(&str, W)>
where
    P: Post,
    W: Copy + Default + Ord,
    F: Fn(W, &P) -> W,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, W)> = Vec::new();

    for blog in blogs {
        let slot = *slots.entry(blog.author()).or_insert_with(|| {
            totals.push((blog.author(), W::default()));
            totals.len() - 1
        });
        totals[slot].1 = tally(totals[slot].1, blog);
    }

    totals
        .into_iter()
        .reduce(|max, total| if total.1 > max.1 { total } else { max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, author: &str, likes: u64) -> BlogEntry {
        BlogEntry {
            title: title.to_string(),
            author: author.to_string(),
            url: format!("https://example.com/{title}"),
            likes,
        }
    }

    fn sample() -> Vec<BlogEntry> {
        vec![
            entry("React patterns", "Michael Chan", 7),
            entry("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            entry("Canonical string reduction", "Edsger W. Dijkstra", 12),
            entry("First class tests", "Robert C. Martin", 10),
            entry("TDD harms architecture", "Robert C. Martin", 0),
            entry("Type wars", "Robert C. Martin", 2),
        ]
    }

    #[test]
    fn test_total_likes() {
        assert_eq!(total_likes::<BlogEntry>(&[]), 0);
        assert_eq!(total_likes(&[entry("a", "A", 5), entry("b", "B", 3)]), 8);
        assert_eq!(total_likes(&sample()), 36);
    }

    #[test]
    fn test_favorite_blog() {
        assert!(favorite_blog::<BlogEntry>(&[]).is_none());

        let blogs = sample();
        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.title, "Canonical string reduction");
        assert_eq!(favorite.likes, 12);
        assert!(blogs.iter().all(|blog| blog.likes <= favorite.likes));
    }

    #[test]
    fn test_favorite_blog_tie() {
        let blogs = vec![entry("a", "A", 4), entry("b", "B", 4), entry("c", "C", 1)];
        assert_eq!(favorite_blog(&blogs).unwrap().title, "a");
    }

    #[test]
    fn test_most_blogs() {
        assert!(most_blogs::<BlogEntry>(&[]).is_none());

        let blogs = vec![entry("1", "A", 0), entry("2", "A", 0), entry("3", "B", 0)];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: "A".to_string(),
                blogs: 2,
            })
        );

        assert_eq!(most_blogs(&sample()).unwrap().author, "Robert C. Martin");
    }

    #[test]
    fn test_most_blogs_tie() {
        let blogs = vec![entry("1", "B", 0), entry("2", "A", 0), entry("3", "A", 0), entry("4", "B", 0)];
        assert_eq!(most_blogs(&blogs).unwrap().author, "B");
    }

    #[test]
    fn test_most_likes() {
        assert!(most_likes::<BlogEntry>(&[]).is_none());

        let blogs = vec![entry("1", "A", 3), entry("2", "A", 5), entry("3", "B", 4)];
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: "A".to_string(),
                likes: 8,
            })
        );

        assert_eq!(
            most_likes(&sample()),
            Some(AuthorLikes {
                author: "Edsger W. Dijkstra".to_string(),
                likes: 17,
            })
        );
    }

    #[test]
    fn test_most_likes_tie() {
        let blogs = vec![entry("1", "B", 3), entry("2", "A", 1), entry("3", "A", 2)];
        assert_eq!(most_likes(&blogs).unwrap().author, "B");
    }

    #[test]
    fn test_likes_saturate() {
        let max = i64::MAX as u64;
        let blogs = vec![entry("1", "A", max), entry("2", "A", max), entry("3", "B", max)];
        let summary = summarize(&blogs);

        assert_eq!(summary.total_likes, u64::MAX);
        assert_eq!(
            summary.most_likes,
            Some(AuthorLikes {
                author: "A".to_string(),
                likes: u64::MAX,
            })
        );
        assert_eq!(summary.favorite_blog.unwrap().title, "1");
    }

    #[test]
    fn test_single_blog() {
        let blogs = vec![entry("only", "Solo", 5)];
        let summary = summarize(&blogs);

        assert_eq!(summary.total_blogs, 1);
        assert_eq!(summary.total_likes, 5);
        assert_eq!(summary.favorite_blog.unwrap().title, "only");
        assert_eq!(summary.most_blogs.unwrap().blogs, 1);
        assert_eq!(summary.most_likes.unwrap().likes, 5);
    }

    #[test]
    fn test_summary_json() {
        let json = serde_json::to_value(summarize::<BlogEntry>(&[])).unwrap();
        assert_eq!(json["totalLikes"], 0);
        assert!(json["favoriteBlog"].is_null());
        assert!(json["mostBlogs"].is_null());
    }
}
