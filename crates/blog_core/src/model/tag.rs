//! Tag record and the post/tag association.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::post::PostId;
use super::OrNone;

/// Surrogate key assigned by the `tags` table.
pub type TagId = i64;

/// Label attached to posts. `name` is unique across all tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<TagId>,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tag id: {} name: {}", OrNone(&self.id), self.name)
    }
}

/// One `post_tag` row. Each `(post_id, tag_id)` pair exists at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: PostId,
    pub tag_id: TagId,
}

impl PostTag {
    pub fn new(post_id: PostId, tag_id: TagId) -> Self {
        Self { post_id, tag_id }
    }
}
