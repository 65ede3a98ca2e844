//! Blog post read model.
//!
//! # Invariants
//! - `id` is monotonic; listings order by it descending.
//! - `author` and `category` are `None` when the reference is unset or the
//!   referenced row was removed.

use crate::model::author::Author;
use crate::model::taxonomy::{Category, Tag};
use serde::Serialize;

/// Published blog post with its resolved references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: Option<Author>,
    pub category: Option<Category>,
    /// Sorted by tag name.
    pub tags: Vec<Tag>,
    pub is_published: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}
