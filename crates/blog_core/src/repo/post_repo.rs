//! Post repository contract and SQLite implementation.
//!
//! # Invariants
//! - `insert_post` stores the slug as given; it never derives one.
//! - A missing `created_at` is stamped by the store at insert time.
//! - Post lists are ordered by id.

use crate::model::post::{Post, PostId};
use crate::model::user::UserId;
use crate::repo::{ensure_tables, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const POST_COLUMNS_SQL: &str = "p.id AS id,
    p.title AS title,
    p.slug AS slug,
    p.body AS body,
    p.created_at AS created_at,
    p.user_id AS user_id";

/// Repository interface for post persistence.
pub trait PostRepository {
    /// Inserts `post` and returns the assigned id.
    fn insert_post(&self, post: &Post) -> RepoResult<PostId>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// Lists posts owned by `user_id`, oldest first.
    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["users", "posts"])?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn insert_post(&self, post: &Post) -> RepoResult<PostId> {
        self.conn.execute(
            "INSERT INTO posts (
                title,
                slug,
                body,
                created_at,
                user_id
            ) VALUES (?1, ?2, ?3, COALESCE(?4, strftime('%s', 'now') * 1000), ?5);",
            params![
                post.title.as_deref(),
                post.slug.as_deref(),
                post.body.as_str(),
                post.created_at,
                post.user_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {POST_COLUMNS_SQL}
             FROM posts p
             WHERE p.id = ?1;"
        ))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {POST_COLUMNS_SQL}
             FROM posts p
             WHERE p.user_id = ?1
             ORDER BY p.id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }
        Ok(posts)
    }
}

pub(crate) fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    Ok(Post {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        slug: row.get("slug")?,
        body: row.get("body")?,
        created_at: Some(row.get("created_at")?),
        user_id: row.get("user_id")?,
    })
}
