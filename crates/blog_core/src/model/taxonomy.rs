//! Category and tag read models.

use serde::Serialize;

/// Single-valued post classification addressed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

/// Multi-valued post label addressed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub slug: String,
    pub name: String,
}
