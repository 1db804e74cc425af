use std::str::FromStr;

use axum::{Json, extract::rejection::JsonRejection};
use blogs::{
    models::{Blog, BlogId, UserId},
    payloads::{BlogUpdate, NewBlog, NewUser},
};
use tracing::debug;

use crate::error::AppError::{self, MalformedPayload, Validation};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 3;

pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse().map_err(|_| AppError::MalformedId)
}

pub fn payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(payload)| payload).map_err(|rejection| {
        debug!("Rejected payload: {rejection}");
        MalformedPayload
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Validation(format!(
            "Blog validation failed: `{field}` is required"
        ))),
    }
}

fn likes(value: i64) -> Result<u64, AppError> {
    u64::try_from(value).map_err(|_| Validation("likes must be a non-negative integer".to_string()))
}

pub fn build_blog(input: NewBlog, owner: UserId) -> Result<Blog, AppError> {
    Ok(Blog {
        id: BlogId::generate(),
        title: required(input.title, "title")?,
        url: required(input.url, "url")?,
        author: input.author.map(|a| a.trim().to_string()).unwrap_or_default(),
        likes: likes(input.likes.unwrap_or(0))?,
        user: owner,
    })
}

/// Applies the present fields of `update`, validating them like a new blog.
pub fn apply_update(mut blog: Blog, update: BlogUpdate) -> Result<Blog, AppError> {
    if update.title.is_some() {
        blog.title = required(update.title, "title")?;
    }
    if update.url.is_some() {
        blog.url = required(update.url, "url")?;
    }
    if let Some(author) = update.author {
        blog.author = author.trim().to_string();
    }
    if let Some(value) = update.likes {
        blog.likes = likes(value)?;
    }

    Ok(blog)
}

/// Checks a registration, returning the username, name and password.
pub fn validate_user(input: NewUser) -> Result<(String, String, String), AppError> {
    let password = input.password.unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    let username = input.username.map(|u| u.trim().to_string()).unwrap_or_default();
    if username.is_empty() {
        return Err(Validation(
            "User validation failed: `username` is required".to_string(),
        ));
    }
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(Validation(format!(
            "User validation failed: `username` is shorter than the minimum allowed length ({MIN_USERNAME_LENGTH})"
        )));
    }

    let name = input.name.map(|n| n.trim().to_string()).unwrap_or_default();

    Ok((username, name, password))
}
