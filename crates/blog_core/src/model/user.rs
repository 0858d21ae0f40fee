//! User record.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::OrNone;

/// Surrogate key assigned by the `users` table.
pub type UserId = i64;

/// Blog author. `username` is unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub username: String,
    pub fullname: String,
    pub is_admin: bool,
}

impl User {
    /// Creates an unsaved, non-admin user.
    pub fn new(username: impl Into<String>, fullname: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            fullname: fullname.into(),
            is_admin: false,
        }
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User(id={}, username='{}', fullname={}, is admin={})",
            OrNone(&self.id),
            self.username,
            self.fullname,
            self.is_admin
        )
    }
}
