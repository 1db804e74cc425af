mod blogs;
mod login;
mod testing;
mod users;

pub use blogs::{
    blog_handler, blog_stats_handler, blogs_handler, create_blog_handler, delete_blog_handler,
    like_blog_handler, update_blog_handler,
};
pub use login::login_handler;
pub use testing::reset_handler;
pub use users::{create_user_handler, users_handler};

pub async fn health_handler() -> &'static str {
    "ok"
}
