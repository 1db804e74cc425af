use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use blogs::payloads::{Credentials, LoginResponse};
use tracing::info;

use crate::{
    auth::verify_password,
    error::{AppError, AppResult},
    state::AppState,
    utils::payload,
};

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let credentials = payload(body)?;

    let user = state
        .store
        .user_by_username(credentials.username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(user.password_hash.clone(), credentials.password).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user)?;
    info!("{} logged in", user.username);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
