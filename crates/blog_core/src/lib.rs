//! Core read path for the blog: which content is visible, how it is
//! filtered, ordered, paginated and titled.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId};
pub use model::page::Page;
pub use model::post::Post;
pub use model::taxonomy::{Category, Tag};
pub use query::paginator::{PageCursor, PageInfo, Paginator, PER_PAGE};
pub use query::{ListingKind, PostFilter, Window};
pub use repo::content_repo::{ContentRepository, SqliteContentRepository};
pub use repo::{RepoError, RepoResult};
pub use service::content_service::{
    ContentQueryService, Listing, MissingContent, QueryError, QueryOutcome, QueryResult,
};
pub use view::{handle, Request, ViewContext, ViewResponse};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
