use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use blogs::{
    list_helper::{BlogSummary, summarize},
    models::{Blog, BlogId, User, UserId},
    ownership::ensure_owner,
    payloads::{BlogUpdate, BlogView, NewBlog},
};
use tracing::info;

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
    utils::{apply_update, build_blog, parse_id, payload},
};

async fn owners(state: &AppState) -> AppResult<HashMap<UserId, User>> {
    Ok(state
        .store
        .users()
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect())
}

async fn view(state: &AppState, blog: Blog) -> AppResult<BlogView> {
    let owner = state.store.user(&blog.user).await?;
    Ok(BlogView::new(blog, owner.as_ref()))
}

async fn owned_blog(state: &AppState, raw_id: &str, user: &User) -> AppResult<Blog> {
    let id: BlogId = parse_id(raw_id)?;
    let blog = state.store.blog(&id).await?.ok_or(AppError::NotFound)?;

    ensure_owner(&blog.user, &user.id)?;

    Ok(blog)
}

pub async fn blogs_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<BlogView>>> {
    let owners = owners(&state).await?;

    let blogs = state
        .store
        .blogs()
        .await?
        .into_iter()
        .map(|blog| {
            let owner = owners.get(&blog.user);
            BlogView::new(blog, owner)
        })
        .collect();

    Ok(Json(blogs))
}

pub async fn blog_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<BlogView>> {
    let id: BlogId = parse_id(&id)?;
    let blog = state.store.blog(&id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(view(&state, blog).await?))
}

pub async fn blog_stats_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<BlogSummary>> {
    let blogs = state.store.blogs().await?;

    Ok(Json(summarize(&blogs)))
}

pub async fn create_blog_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    body: Result<Json<NewBlog>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BlogView>)> {
    let blog = build_blog(payload(body)?, user.id)?;

    state.store.insert_blog(&blog).await?;
    info!("{} created blog {}", user.username, blog.id);

    Ok((StatusCode::CREATED, Json(BlogView::new(blog, Some(&user)))))
}

pub async fn update_blog_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<BlogUpdate>, JsonRejection>,
) -> AppResult<Json<BlogView>> {
    let blog = owned_blog(&state, &id, &user).await?;
    let update = payload(body)?;
    let likes_changed = update.likes.is_some();
    let blog = apply_update(blog, update)?;

    let blog = state
        .store
        .update_blog(&blog, likes_changed.then_some(blog.likes))
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(BlogView::new(blog, Some(&user))))
}

pub async fn like_blog_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<BlogView>> {
    let id: BlogId = parse_id(&id)?;
    let blog = state.store.like_blog(&id).await?.ok_or(AppError::NotFound)?;

    Ok(Json(view(&state, blog).await?))
}

pub async fn delete_blog_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let blog = owned_blog(&state, &id, &user).await?;

    if !state.store.delete_blog(&blog.id).await? {
        return Err(AppError::NotFound);
    }
    info!("{} deleted blog {}", user.username, blog.id);

    Ok(StatusCode::NO_CONTENT)
}
