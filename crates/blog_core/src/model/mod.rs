//! Blog domain model.
//!
//! # Responsibility
//! - Define `User`, `Post`, `Tag` and the `PostTag` association.
//! - Own the slug derivation applied at post construction.
//!
//! # Invariants
//! - Ids are `None` until the row is persisted; the store assigns them.
//! - Relationships are ids, never in-memory references.

use std::fmt::{Display, Formatter};

pub mod post;
pub mod slug;
pub mod tag;
pub mod user;

/// Renders an unset value as `None`, a set one as-is.
pub(crate) struct OrNone<'a, T>(pub &'a Option<T>);

impl<T: Display> Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("None"),
        }
    }
}
