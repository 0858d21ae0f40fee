//! Blog use-case services.
//!
//! # Responsibility
//! - Turn minimal field sets into entities and persist them.
//! - Replace implicit relationship traversal with explicit lookups.

pub mod blog_service;
