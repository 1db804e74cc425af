use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use blogs::{
    models::{BlogId, User, UserId},
    payloads::{NewUser, PostedBlog, UserView},
};
use tracing::info;

use crate::{
    auth::hash_password,
    error::{AppError, AppResult},
    state::AppState,
    utils::{payload, validate_user},
};

pub async fn users_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<UserView>>> {
    let blogs: HashMap<BlogId, PostedBlog> = state
        .store
        .blogs()
        .await?
        .iter()
        .map(|blog| (blog.id, PostedBlog::from(blog)))
        .collect();

    let mut users = state.store.users().await?;
    users.sort_by(|a, b| a.username.cmp(&b.username));

    let users = users
        .into_iter()
        .map(|user| {
            let posted = user
                .blogs
                .iter()
                .filter_map(|id| blogs.get(id).cloned())
                .collect();
            UserView::new(user, posted)
        })
        .collect();

    Ok(Json(users))
}

pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let (username, name, password) = validate_user(payload(body)?)?;

    let user = User {
        id: UserId::generate(),
        username,
        name,
        password_hash: hash_password(password).await?,
        blogs: Vec::new(),
    };

    if !state.store.insert_user(&user).await? {
        return Err(AppError::Validation(
            "expected `username` to be unique".to_string(),
        ));
    }
    info!("Registered user {}", user.username);

    Ok((StatusCode::CREATED, Json(UserView::new(user, Vec::new()))))
}
