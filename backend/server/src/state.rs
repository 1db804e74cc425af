use std::sync::Arc;

use tracing::info;

use super::{
    auth::TokenAuthority,
    config::{Config, StoreKind},
    database::{RedisStore, init_redis},
    error::AppResult,
    store::{BlogStoreArc, memory::MemoryStore},
};

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub store: BlogStoreArc,
    pub tokens: TokenAuthority,
}

impl AppState {
    pub async fn new() -> AppResult<Arc<Self>> {
        let config = Config::load()?;

        let store: BlogStoreArc = match config.store {
            StoreKind::Redis => {
                info!("Connecting to Redis at {}", config.redis_url);
                Arc::new(RedisStore::new(init_redis(&config.redis_url).await?))
            }
            StoreKind::Memory => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: BlogStoreArc) -> Arc<Self> {
        let tokens = TokenAuthority::new(&config.secret, config.token_ttl);

        Arc::new(Self {
            config,
            store,
            tokens,
        })
    }
}
