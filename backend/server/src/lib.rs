//! Documentation of a blog list backend.
//!
//! Users register, log in, and share links to blog posts that others can like.
//!
//!
//!
//! # General Infrastructure
//! - Single page front-end talks JSON to this server under `/api`
//! - Server keeps users and blogs in Redis, or in memory for tests and demos
//! - Login hands out a signed token, later requests send it as `Authorization: Bearer <token>`
//!
//!
//!
//! # Routes
//!
//! | method | path | token | |
//! |--------|------|-------|-|
//! | GET | `/api/blogs` | | all blogs, owner filled in |
//! | POST | `/api/blogs` | yes | new blog owned by the caller |
//! | GET | `/api/blogs/stats` | | likes and author statistics |
//! | GET | `/api/blogs/{id}` | | one blog |
//! | PUT | `/api/blogs/{id}` | owner | update title, author, url, likes |
//! | POST | `/api/blogs/{id}/like` | yes | one more like |
//! | DELETE | `/api/blogs/{id}` | owner | remove the blog |
//! | GET | `/api/users` | | users with their blogs |
//! | POST | `/api/users` | | register |
//! | POST | `/api/login` | | exchange credentials for a token |
//! | POST | `/api/testing/reset` | | wipe everything, only with `TESTING=true` |
//!
//! Errors come back as `{"error": "..."}`.
//!
//!
//!
//! # Ownership
//!
//! Only the user who created a blog may update or delete it. Anyone logged in may like it.
//! A mismatch is answered with `401 unauthorized`, never ignored.
//!
//!
//!
//! # Setup
//!
//! Environment, `.env` is read when present.
//! ```sh
//! SECRET=change-me        # or /run/secrets/SECRET
//! RUST_PORT=3003
//! STORE=redis             # or memory
//! REDIS_URL=redis://127.0.0.1:6379
//! TOKEN_TTL_SECS=3600
//! TESTING=false
//! ```
//!
//! Run with logs.
//! ```sh
//! RUST_LOG=info cargo run -p bloglist-backend
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

use error::AppResult;
use routes::{
    blog_handler, blog_stats_handler, blogs_handler, create_blog_handler, create_user_handler,
    delete_blog_handler, health_handler, like_blog_handler, login_handler, reset_handler,
    update_blog_handler, users_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let mut api = Router::new()
        .route("/blogs", get(blogs_handler).post(create_blog_handler))
        .route("/blogs/stats", get(blog_stats_handler))
        .route(
            "/blogs/{id}",
            get(blog_handler)
                .put(update_blog_handler)
                .delete(delete_blog_handler),
        )
        .route("/blogs/{id}/like", post(like_blog_handler))
        .route("/users", get(users_handler).post(create_user_handler))
        .route("/login", post(login_handler));

    if state.config.testing {
        info!("Testing routes enabled");
        api = api.route("/testing/reset", post(reset_handler));
    }

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> AppResult<()> {
    dotenv::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            return std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
