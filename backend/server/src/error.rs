use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blogs::{ownership::OwnershipError, payloads::ErrorBody};
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("malformed id")]
    MalformedId,

    #[error("{0}")]
    Validation(String),

    #[error("token invalid")]
    InvalidToken,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("unauthorized")]
    NotOwner(#[from] OwnershipError),

    #[error("not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type AppResult<T> = Result<T, AppError>;

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::InternalError(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(
    redis::RedisError,
    serde_json::Error,
    jsonwebtoken::errors::Error,
    argon2::Error,
    tokio::task::JoinError,
    std::io::Error,
);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload | AppError::MalformedId | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidToken | AppError::InvalidCredentials | AppError::NotOwner(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            AppError::Config(_) | AppError::InternalError(_) => {
                error!("Internal service error: {self}");
                "internal error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
