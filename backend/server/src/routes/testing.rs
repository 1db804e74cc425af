use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use tracing::warn;

use crate::{error::AppResult, state::AppState};

pub async fn reset_handler(State(state): State<Arc<AppState>>) -> AppResult<StatusCode> {
    warn!("Resetting the store");
    state.store.clear().await?;

    Ok(StatusCode::NO_CONTENT)
}
