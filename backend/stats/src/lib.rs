//! # Blog Statistics
//!
//! Reads a JSON array of blogs, as returned by `GET /api/blogs` or exported from the
//! database, and prints the totals and top authors.
//!
//! ```sh
//! cargo run -p stats -- blogs.json
//! cargo run -p stats -- blogs.json --json
//! ```
use std::path::PathBuf;

use anyhow::Context;
use blogs::{
    list_helper::{BlogSummary, summarize},
    read_entries,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// JSON file holding an array of blogs
    pub path: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &Args) -> anyhow::Result<String> {
    let entries = read_entries(&args.path)
        .with_context(|| format!("Loading blogs from {}", args.path.display()))?;
    let summary = summarize(&entries);

    if args.json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    Ok(render(&summary))
}

pub fn render(summary: &BlogSummary) -> String {
    let favorite = summary.favorite_blog.as_ref().map_or("none".to_string(), |blog| {
        format!("{} by {} ({} likes)", blog.title, blog.author, blog.likes)
    });
    let most_blogs = summary.most_blogs.as_ref().map_or("none".to_string(), |top| {
        format!("{} ({} blogs)", top.author, top.blogs)
    });
    let most_likes = summary.most_likes.as_ref().map_or("none".to_string(), |top| {
        format!("{} ({} likes)", top.author, top.likes)
    });

    [
        format!("Blogs: {}", summary.total_blogs),
        format!("Total Likes: {}", summary.total_likes),
        format!("Favorite Blog: {favorite}"),
        format!("Most Blogs: {most_blogs}"),
        format!("Most Likes: {most_likes}"),
    ]
    .join("\n")
}
