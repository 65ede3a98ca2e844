//! Published-content query service.
//!
//! # Responsibility
//! - Resolve a [`ListingKind`] into a filter, a title and a pagination mode.
//! - Run the single listing pipeline shared by every kind.
//! - Resolve single pages/posts by slug.
//!
//! # Invariants
//! - Only published posts/pages are ever returned.
//! - A blank search term never reaches storage; it yields a redirect.
//! - Category listings with no published posts are not-found; tag and
//!   author listings only require the tag/author record to exist.
//! - Search results are capped at one page and ignore the cursor.

use crate::model::author::AuthorId;
use crate::model::page::Page;
use crate::model::post::Post;
use crate::query::paginator::{PageCursor, PageInfo, Paginator, PER_PAGE};
use crate::query::title::{author_title, search_title, HOME_TITLE};
use crate::query::{ListingKind, PostFilter, Window};
use crate::repo::content_repo::ContentRepository;
use crate::repo::RepoError;
use log::{debug, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type QueryResult<T> = Result<T, QueryError>;

/// What a reader asked for that does not exist (or is not published).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingContent {
    Author(AuthorId),
    Category(String),
    Tag(String),
    Page(String),
    Post(String),
}

impl Display for MissingContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Author(id) => write!(f, "author `{id}`"),
            Self::Category(slug) => write!(f, "category `{slug}`"),
            Self::Tag(slug) => write!(f, "tag `{slug}`"),
            Self::Page(slug) => write!(f, "page `{slug}`"),
            Self::Post(slug) => write!(f, "post `{slug}`"),
        }
    }
}

/// Service error for content queries.
#[derive(Debug)]
pub enum QueryError {
    /// Surfaced to readers as a plain not-found response.
    NotFound(MissingContent),
    /// Persistence-layer failure; not recoverable within the request.
    Repo(RepoError),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(missing) => write!(f, "not found: {missing}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for QueryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One rendered page of posts plus its display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub kind: ListingKind,
    pub title: String,
    /// Newest first.
    pub posts: Vec<Post>,
    pub page_info: PageInfo,
    /// Trimmed term, set for search listings only.
    pub search_term: Option<String>,
}

/// Result of a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Listing(Listing),
    /// Send the reader to the unfiltered listing instead.
    RedirectToIndex,
}

impl QueryOutcome {
    /// Returns the listing, or `None` for a redirect.
    pub fn into_listing(self) -> Option<Listing> {
        match self {
            Self::Listing(listing) => Some(listing),
            Self::RedirectToIndex => None,
        }
    }
}

enum Pagination {
    Paged(PageCursor),
    /// First `n` matches only.
    Capped(u32),
}

enum TitleRule {
    Fixed(String),
    /// Name of the category shared by the listed posts.
    CategoryName,
}

/// Filter, title and paging mode resolved for one listing request.
struct ListingPlan<'a> {
    filter: PostFilter<'a>,
    title: TitleRule,
    pagination: Pagination,
    /// Empty results turn into not-found with this payload.
    missing_when_empty: Option<MissingContent>,
}

/// Stateless query facade; each call is independent of the previous one.
pub struct ContentQueryService<R: ContentRepository> {
    repo: R,
}

impl<R: ContentRepository> ContentQueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Runs any listing kind.
    ///
    /// Returns [`QueryOutcome::RedirectToIndex`] only for a blank search.
    pub fn list(&self, kind: ListingKind, cursor: PageCursor) -> QueryResult<QueryOutcome> {
        if let ListingKind::Search(raw) = &kind {
            if raw.trim().is_empty() {
                info!("event=content_query module=service status=redirect kind=search reason=blank_term");
                return Ok(QueryOutcome::RedirectToIndex);
            }
        }
        self.run(kind, cursor).map(QueryOutcome::Listing)
    }

    /// Every published post, newest first, titled "Home".
    pub fn list_all(&self, cursor: PageCursor) -> QueryResult<Listing> {
        self.run(ListingKind::All, cursor)
    }

    /// Published posts by one author; not-found when the author is unknown.
    pub fn list_by_author(&self, author_id: AuthorId, cursor: PageCursor) -> QueryResult<Listing> {
        self.run(ListingKind::ByAuthor(author_id), cursor)
    }

    /// Published posts in one category; not-found when nothing matches.
    pub fn list_by_category(&self, slug: &str, cursor: PageCursor) -> QueryResult<Listing> {
        self.run(ListingKind::ByCategory(slug.to_string()), cursor)
    }

    /// Published posts with one tag; not-found only when the tag is unknown.
    pub fn list_by_tag(&self, slug: &str, cursor: PageCursor) -> QueryResult<Listing> {
        self.run(ListingKind::ByTag(slug.to_string()), cursor)
    }

    /// First [`PER_PAGE`] published posts mentioning `term`.
    ///
    /// `term` is trimmed first; a blank term redirects to the index.
    pub fn search(&self, term: &str) -> QueryResult<QueryOutcome> {
        self.list(ListingKind::Search(term.to_string()), PageCursor::First)
    }

    /// Published page by slug.
    pub fn get_page(&self, slug: &str) -> QueryResult<Page> {
        let page = self.repo.find_published_page(slug)?;
        debug!(
            "event=content_lookup module=service kind=page found={}",
            page.is_some()
        );
        page.ok_or_else(|| QueryError::NotFound(MissingContent::Page(slug.to_string())))
    }

    /// Published post by slug; drafts are reported as not-found.
    pub fn get_post(&self, slug: &str) -> QueryResult<Post> {
        let post = self.repo.find_published_post(slug)?;
        debug!(
            "event=content_lookup module=service kind=post found={}",
            post.is_some()
        );
        post.ok_or_else(|| QueryError::NotFound(MissingContent::Post(slug.to_string())))
    }

    /// Shared listing pipeline: plan, count, window, title.
    fn run(&self, kind: ListingKind, cursor: PageCursor) -> QueryResult<Listing> {
        let started_at = Instant::now();
        let search_term = match &kind {
            ListingKind::Search(raw) => Some(raw.trim().to_string()),
            _ => None,
        };

        let (label, title, posts, page_info) = {
            let plan = self.plan(&kind, search_term.as_deref(), cursor)?;
            let (posts, page_info) = self.execute(&plan)?;
            let title = match plan.title {
                TitleRule::Fixed(title) => title,
                TitleRule::CategoryName => self.category_title(&kind, &posts)?,
            };
            (plan.filter.label(), title, posts, page_info)
        };

        info!(
            "event=content_query module=service status=ok kind={} page={} num_pages={} items={} duration_ms={}",
            label,
            page_info.number,
            page_info.num_pages,
            posts.len(),
            started_at.elapsed().as_millis()
        );

        Ok(Listing {
            kind,
            title,
            posts,
            page_info,
            search_term,
        })
    }

    fn plan<'a>(
        &self,
        kind: &'a ListingKind,
        search_term: Option<&'a str>,
        cursor: PageCursor,
    ) -> QueryResult<ListingPlan<'a>> {
        let plan = match kind {
            ListingKind::All => ListingPlan {
                filter: PostFilter::All,
                title: TitleRule::Fixed(HOME_TITLE.to_string()),
                pagination: Pagination::Paged(cursor),
                missing_when_empty: None,
            },
            ListingKind::ByAuthor(author_id) => {
                let author = self
                    .repo
                    .find_author(*author_id)?
                    .ok_or(QueryError::NotFound(MissingContent::Author(*author_id)))?;
                ListingPlan {
                    filter: PostFilter::Author(*author_id),
                    title: TitleRule::Fixed(author_title(&author)),
                    pagination: Pagination::Paged(cursor),
                    missing_when_empty: None,
                }
            }
            ListingKind::ByCategory(slug) => ListingPlan {
                filter: PostFilter::CategorySlug(slug),
                title: TitleRule::CategoryName,
                pagination: Pagination::Paged(cursor),
                missing_when_empty: Some(MissingContent::Category(slug.clone())),
            },
            ListingKind::ByTag(slug) => {
                let tag = self
                    .repo
                    .find_tag(slug)?
                    .ok_or_else(|| QueryError::NotFound(MissingContent::Tag(slug.clone())))?;
                ListingPlan {
                    filter: PostFilter::TagSlug(slug),
                    title: TitleRule::Fixed(tag.name),
                    pagination: Pagination::Paged(cursor),
                    missing_when_empty: None,
                }
            }
            ListingKind::Search(_) => {
                let term = search_term.unwrap_or_default();
                ListingPlan {
                    filter: PostFilter::Mentions(term),
                    title: TitleRule::Fixed(search_title(term)),
                    pagination: Pagination::Capped(PER_PAGE),
                    missing_when_empty: None,
                }
            }
        };
        Ok(plan)
    }

    fn execute(&self, plan: &ListingPlan<'_>) -> QueryResult<(Vec<Post>, PageInfo)> {
        match plan.pagination {
            Pagination::Paged(cursor) => {
                let total = self.repo.count_published_posts(&plan.filter)?;
                if total == 0 {
                    if let Some(missing) = &plan.missing_when_empty {
                        return Err(QueryError::NotFound(missing.clone()));
                    }
                    return Ok((Vec::new(), Paginator::new(0, PER_PAGE).page(cursor)));
                }

                let page_info = Paginator::new(total, PER_PAGE).page(cursor);
                let posts = self
                    .repo
                    .list_published_posts(&plan.filter, page_info.window())?;
                Ok((posts, page_info))
            }
            Pagination::Capped(limit) => {
                let posts = self
                    .repo
                    .list_published_posts(&plan.filter, Window { limit, offset: 0 })?;
                let page_info = PageInfo::single(posts.len(), limit);
                Ok((posts, page_info))
            }
        }
    }

    /// Category name from the listed posts, falling back to the record.
    fn category_title(&self, kind: &ListingKind, posts: &[Post]) -> QueryResult<String> {
        if let Some(category) = posts.first().and_then(|post| post.category.as_ref()) {
            return Ok(category.name.clone());
        }

        let ListingKind::ByCategory(slug) = kind else {
            return Err(QueryError::Repo(RepoError::InvalidData(
                "category title requested for a non-category listing".to_string(),
            )));
        };
        self.repo
            .find_category(slug)?
            .map(|category| category.name)
            .ok_or_else(|| QueryError::NotFound(MissingContent::Category(slug.clone())))
    }
}
