//! Tag repository contract and SQLite implementation, including the
//! `post_tag` association.
//!
//! # Invariants
//! - `link_post_tags` writes the whole batch in one transaction; a failing
//!   pair leaves no rows from that batch behind.
//! - A repeated `(post_id, tag_id)` pair is a unique violation, never a no-op.

use crate::model::post::{Post, PostId};
use crate::model::tag::{PostTag, Tag, TagId};
use crate::repo::post_repo::{parse_post_row, POST_COLUMNS_SQL};
use crate::repo::{ensure_tables, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for tags and post/tag links.
pub trait TagRepository {
    /// Inserts `tag` and returns the assigned id.
    fn insert_tag(&self, tag: &Tag) -> RepoResult<TagId>;
    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>>;
    /// Lists all tags ordered by id.
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
    /// Inserts all `links` atomically.
    fn link_post_tags(&self, links: &[PostTag]) -> RepoResult<()>;
    fn list_tags_for_post(&self, post_id: PostId) -> RepoResult<Vec<Tag>>;
    fn list_posts_for_tag(&self, tag_id: TagId) -> RepoResult<Vec<Post>>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["posts", "tags", "post_tag"])?;
        Ok(Self { conn })
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn insert_tag(&self, tag: &Tag) -> RepoResult<TagId> {
        self.conn
            .execute("INSERT INTO tags (name) VALUES (?1);", [tag.name.as_str()])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_tag_row(row)?));
        }

        Ok(None)
    }

    fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn link_post_tags(&self, links: &[PostTag]) -> RepoResult<()> {
        // Dropping the transaction on an early return rolls the batch back.
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO post_tag (post_id, tag_id) VALUES (?1, ?2);")?;
            for link in links {
                stmt.execute(params![link.post_id, link.tag_id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn list_tags_for_post(&self, post_id: PostId) -> RepoResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id AS id, t.name AS name
             FROM post_tag pt
             INNER JOIN tags t ON t.id = pt.tag_id
             WHERE pt.post_id = ?1
             ORDER BY t.id ASC;",
        )?;
        let mut rows = stmt.query([post_id])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(parse_tag_row(row)?);
        }
        Ok(tags)
    }

    fn list_posts_for_tag(&self, tag_id: TagId) -> RepoResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {POST_COLUMNS_SQL}
             FROM post_tag pt
             INNER JOIN posts p ON p.id = pt.post_id
             WHERE pt.tag_id = ?1
             ORDER BY p.id ASC;"
        ))?;
        let mut rows = stmt.query([tag_id])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }
        Ok(posts)
    }
}

fn parse_tag_row(row: &Row<'_>) -> RepoResult<Tag> {
    Ok(Tag {
        id: Some(row.get("id")?),
        name: row.get("name")?,
    })
}
