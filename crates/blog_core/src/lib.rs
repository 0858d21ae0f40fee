//! Core of the blog demo: a User/Post/Tag model persisted in SQLite.
//! Storage guarantees (keys, uniqueness, foreign keys, transactions) come
//! from SQLite; this crate owns the schema, the slug rule and the glue.

pub mod config;
pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::BlogConfig;
pub use db::{close_db, open_db, open_db_in_memory, open_db_with_config, DbError, DbResult};
pub use demo::{run_demo, DemoError, DemoResult, DemoSummary};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::post::{Post, PostId};
pub use model::slug::generate_slug;
pub use model::tag::{PostTag, Tag, TagId};
pub use model::user::{User, UserId};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::blog_service::{BlogService, ServiceError, ServiceResult, SqliteBlogService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
