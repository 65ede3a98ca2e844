//! URL path → route resolution.
//!
//! # Invariants
//! - Slug segments match `^[-a-zA-Z0-9_]+$`; anything else does not route.
//! - Author ids are positive integers.
//! - A trailing slash is optional.

use crate::model::author::AuthorId;
use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

/// Every path the blog answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    CreatedBy(AuthorId),
    Category(String),
    Tag(String),
    Search,
    Page(String),
    Post(String),
}

impl Route {
    /// Resolves a request path (without query string), or `None` when
    /// nothing matches.
    pub fn resolve(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Some(Self::Index);
        }

        let segments = trimmed.split('/').collect::<Vec<_>>();
        match segments.as_slice() {
            ["search"] => Some(Self::Search),
            ["created_by", id] => parse_author_id(id).map(Self::CreatedBy),
            ["category", slug] => valid_slug(slug).map(Self::Category),
            ["tag", slug] => valid_slug(slug).map(Self::Tag),
            ["page", slug] => valid_slug(slug).map(Self::Page),
            ["post", slug] => valid_slug(slug).map(Self::Post),
            _ => None,
        }
    }
}

fn valid_slug(segment: &str) -> Option<String> {
    SLUG_RE
        .is_match(segment)
        .then(|| segment.to_string())
}

fn parse_author_id(segment: &str) -> Option<AuthorId> {
    if !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse::<AuthorId>().ok().filter(|id| *id > 0)
}
