//! # Authentication
//!
//! - Passwords: argon2 encoded hashes with a random 16 byte salt
//! - Tokens: HS256 JWT, `sub` is the user id, sent as `Authorization: Bearer <token>`
//! - [`AuthUser`]: extractor resolving the bearer token to a stored user
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
    time::Duration,
};

use argon2::Config as ArgonConfig;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use blogs::models::{User, UserId};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use tracing::debug;

use crate::{error::AppError, state::AppState};

pub const BEARER_PREFIX: &str = "Bearer";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: u64,
}

pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Debug for TokenAuthority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenAuthority {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation: {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_exp = true;
                validation
            },
            ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            exp: get_current_timestamp() + self.ttl.as_secs(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub fn authenticate(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                debug!("Rejected token: {err}");
                None
            }
        }
    }

    /// Authenticates a header value in the `Bearer <token>` form.
    pub fn authenticate_bearer(&self, bearer: &str) -> Option<Claims> {
        let (scheme, token) = bearer.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
            return None;
        }
        self.authenticate(token.trim())
    }
}

pub async fn hash_password(password: String) -> Result<String, AppError> {
    let salt: [u8; 16] = rand::thread_rng().r#gen();

    let hash = spawn_blocking(move || {
        argon2::hash_encoded(password.as_bytes(), &salt, &ArgonConfig::default())
    })
    .await??;

    Ok(hash)
}

pub async fn verify_password(hash: String, password: String) -> Result<bool, AppError> {
    let matches =
        spawn_blocking(move || argon2::verify_encoded(&hash, password.as_bytes()).unwrap_or(false))
            .await?;

    Ok(matches)
}

/// The user behind a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|bearer| state.tokens.authenticate_bearer(bearer))
            .ok_or(AppError::InvalidToken)?;

        let id: UserId = claims.sub.parse().map_err(|_| AppError::InvalidToken)?;
        let user = state.store.user(&id).await?.ok_or(AppError::InvalidToken)?;

        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: UserId::generate(),
            username: "root".to_string(),
            name: "Superuser".to_string(),
            password_hash: String::new(),
            blogs: Vec::new(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let tokens = TokenAuthority::new("test_secret_key", Duration::from_secs(3600));
        let user = user();

        let token = tokens.issue(&user).unwrap();
        let claims = tokens.authenticate_bearer(&format!("Bearer {token}")).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "root");
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = TokenAuthority::new("test_secret_key", Duration::from_secs(3600));
        let verifier = TokenAuthority::new("wrong_secret_key", Duration::from_secs(3600));

        let token = issuer.issue(&user()).unwrap();
        assert!(verifier.authenticate(&token).is_none());
    }

    #[test]
    fn test_malformed_bearer() {
        let tokens = TokenAuthority::new("test_secret_key", Duration::from_secs(3600));
        let token = tokens.issue(&user()).unwrap();

        assert!(tokens.authenticate_bearer(&token).is_none());
        assert!(tokens.authenticate_bearer(&format!("Basic {token}")).is_none());
        assert!(tokens.authenticate_bearer("Bearer not.a.token").is_none());
    }

    #[tokio::test]
    async fn test_password_hash() {
        let hash = hash_password("sekret".to_string()).await.unwrap();

        assert_ne!(hash, "sekret");
        assert!(verify_password(hash.clone(), "sekret".to_string()).await.unwrap());
        assert!(!verify_password(hash, "wrong".to_string()).await.unwrap());
    }
}
