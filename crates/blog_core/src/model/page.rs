//! Static page read model.

use serde::Serialize;

/// Stand-alone page such as "about".
///
/// Only pages with `is_published == true` ever leave the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub is_published: bool,
}
