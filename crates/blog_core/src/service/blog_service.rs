//! Blog use-case service.
//!
//! # Responsibility
//! - Expose `create_user`, `create_post`, `create_tag` and `query_all_users`.
//! - Read every written row back so callers get assigned ids and defaults.
//!
//! # Invariants
//! - Each `create_*` performs exactly one insert, committed before return.
//! - Uniqueness is decided by the store; nothing is pre-checked here.

use crate::model::post::{Post, PostId};
use crate::model::tag::{PostTag, Tag, TagId};
use crate::model::user::{User, UserId};
use crate::repo::post_repo::{PostRepository, SqlitePostRepository};
use crate::repo::tag_repo::{SqliteTagRepository, TagRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for blog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Persistence-layer failure, including constraint violations.
    Repo(RepoError),
    /// A row written by this service could not be read back.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Repo(err) if err.is_unique_violation())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent blog state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Blog service facade over repository implementations.
pub struct BlogService<U, P, T> {
    users: U,
    posts: P,
    tags: T,
}

/// Service wired to SQLite repositories sharing one connection.
pub type SqliteBlogService<'conn> = BlogService<
    SqliteUserRepository<'conn>,
    SqlitePostRepository<'conn>,
    SqliteTagRepository<'conn>,
>;

impl<'conn> SqliteBlogService<'conn> {
    /// Builds the service over a migrated connection.
    pub fn try_from_conn(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteUserRepository::try_new(conn)?,
            SqlitePostRepository::try_new(conn)?,
            SqliteTagRepository::try_new(conn)?,
        ))
    }
}

impl<U, P, T> BlogService<U, P, T>
where
    U: UserRepository,
    P: PostRepository,
    T: TagRepository,
{
    pub fn new(users: U, posts: P, tags: T) -> Self {
        Self { users, posts, tags }
    }

    /// Creates and persists a non-admin user.
    pub fn create_user(
        &self,
        username: impl Into<String>,
        fullname: impl Into<String>,
    ) -> ServiceResult<User> {
        let user = User::new(username, fullname);
        let user_id = log_write("user_create", self.users.insert_user(&user))?;
        info!("event=user_create module=service status=ok user_id={user_id}");
        self.users
            .get_user(user_id)?
            .ok_or(ServiceError::InconsistentState(
                "created user not found in read-back",
            ))
    }

    /// Creates and persists a post; the slug is derived from `title`.
    pub fn create_post(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        user_id: UserId,
    ) -> ServiceResult<Post> {
        self.save_post(Post::new(title, body, user_id))
    }

    /// Persists an already constructed post, e.g. one with an explicit slug.
    pub fn save_post(&self, post: Post) -> ServiceResult<Post> {
        let post_id = log_write("post_create", self.posts.insert_post(&post))?;
        info!(
            "event=post_create module=service status=ok post_id={} user_id={}",
            post_id, post.user_id
        );
        self.posts
            .get_post(post_id)?
            .ok_or(ServiceError::InconsistentState(
                "created post not found in read-back",
            ))
    }

    /// Creates and persists a tag.
    pub fn create_tag(&self, name: impl Into<String>) -> ServiceResult<Tag> {
        let tag = Tag::new(name);
        let tag_id = log_write("tag_create", self.tags.insert_tag(&tag))?;
        info!("event=tag_create module=service status=ok tag_id={tag_id}");
        self.tags
            .get_tag(tag_id)?
            .ok_or(ServiceError::InconsistentState(
                "created tag not found in read-back",
            ))
    }

    /// Returns every stored user in insertion order.
    pub fn query_all_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.list_users()?)
    }

    pub fn get_user(&self, user_id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.users.get_user(user_id)?)
    }

    /// Returns the posts owned by `user_id`, oldest first.
    pub fn get_posts_by_user(&self, user_id: UserId) -> ServiceResult<Vec<Post>> {
        Ok(self.posts.list_posts_by_user(user_id)?)
    }

    /// Returns the owner of `post_id`, or `None` when the post is unknown.
    pub fn get_post_author(&self, post_id: PostId) -> ServiceResult<Option<User>> {
        let Some(post) = self.posts.get_post(post_id)? else {
            return Ok(None);
        };
        self.users
            .get_user(post.user_id)?
            .map(Some)
            .ok_or(ServiceError::InconsistentState("post author not found"))
    }

    /// Attaches tags to posts in one transaction.
    pub fn tag_posts(&self, links: &[PostTag]) -> ServiceResult<()> {
        log_write("post_tag_link", self.tags.link_post_tags(links))?;
        info!(
            "event=post_tag_link module=service status=ok count={}",
            links.len()
        );
        Ok(())
    }

    pub fn get_tags_for_post(&self, post_id: PostId) -> ServiceResult<Vec<Tag>> {
        Ok(self.tags.list_tags_for_post(post_id)?)
    }

    pub fn get_posts_for_tag(&self, tag_id: TagId) -> ServiceResult<Vec<Post>> {
        Ok(self.tags.list_posts_for_tag(tag_id)?)
    }

    pub fn list_tags(&self) -> ServiceResult<Vec<Tag>> {
        Ok(self.tags.list_tags()?)
    }
}

fn log_write<V>(event: &str, result: RepoResult<V>) -> RepoResult<V> {
    if let Err(err) = &result {
        let error_code = match err {
            RepoError::UniqueViolation { .. } => "unique_violation",
            RepoError::ForeignKeyViolation { .. } => "foreign_key_violation",
            _ => "db_write_failed",
        };
        warn!("event={event} module=service status=error error_code={error_code}");
    }
    result
}
