//! Post record.
//!
//! # Invariants
//! - A post with a non-empty title always has a non-empty slug.
//! - A slug supplied by the caller is never replaced at construction.
//! - `slug` is unique across all posts (enforced by the store).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::slug::generate_slug;
use super::user::UserId;
use super::OrNone;

/// Surrogate key assigned by the `posts` table.
pub type PostId = i64;

/// Blog post owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<PostId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: String,
    /// Unix epoch milliseconds. `None` until persisted, then stamped by the
    /// store unless set explicitly.
    pub created_at: Option<i64>,
    pub user_id: UserId,
}

impl Post {
    /// Creates an unsaved post and derives its slug from `title`.
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: UserId) -> Self {
        Self::build(Some(title.into()), None, body.into(), user_id)
    }

    /// Creates an unsaved post keeping the caller's slug.
    ///
    /// An empty `slug` counts as not supplied and is derived from `title`.
    pub fn with_slug(
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        Self::build(Some(title.into()), Some(slug.into()), body.into(), user_id)
    }

    /// Creates an unsaved post with neither title nor slug.
    pub fn untitled(body: impl Into<String>, user_id: UserId) -> Self {
        Self::build(None, None, body.into(), user_id)
    }

    /// Re-derives `slug` from the current title.
    ///
    /// Leaves `slug` unchanged when the title is absent or empty.
    pub fn generate_slug(&mut self) {
        if let Some(slug) = self.title.as_deref().and_then(generate_slug) {
            self.slug = Some(slug);
        }
    }

    fn build(title: Option<String>, slug: Option<String>, body: String, user_id: UserId) -> Self {
        let mut post = Self {
            id: None,
            title,
            slug: slug.filter(|value| !value.is_empty()),
            body,
            created_at: None,
            user_id,
        };
        if post.slug.is_none() {
            post.generate_slug();
        }
        post
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Post id: {}, title: {}, slug: {}>",
            OrNone(&self.id),
            OrNone(&self.title),
            OrNone(&self.slug)
        )
    }
}
