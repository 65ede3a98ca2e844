//! Request → response view layer.
//!
//! # Responsibility
//! - Route a reader request to one query-service operation.
//! - Pick the template and build a serializable context for it.
//! - Map not-found and blank-search outcomes to their responses.
//!
//! # Invariants
//! - Query-service not-found errors never escape as `Err`; only storage
//!   failures do.
//! - The view layer keeps no state between requests.

pub mod route;

use crate::model::page::Page;
use crate::model::post::Post;
use crate::query::paginator::{PageCursor, PageInfo};
use crate::repo::content_repo::ContentRepository;
use crate::repo::RepoResult;
use crate::service::content_service::{
    ContentQueryService, Listing, QueryError, QueryOutcome, QueryResult,
};
use log::info;
use route::Route;
use serde::Serialize;
use std::collections::BTreeMap;

pub const INDEX_TEMPLATE: &str = "blog/pages/index.html";
pub const PAGE_TEMPLATE: &str = "blog/pages/pages.html";
pub const POST_TEMPLATE: &str = "blog/pages/post.html";
pub const INDEX_PATH: &str = "/";

/// Incoming reader request: a path plus decoded query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Builds a request from a `path?k=v&k2=v2` target.
    ///
    /// Values are taken verbatim (no percent-decoding); a key without `=`
    /// gets an empty value and a repeated key keeps its last value.
    pub fn from_target(target: &str) -> Self {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .fold(Self::new(path), |request, pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                request.with_param(key, value)
            })
    }

    /// Adds one query parameter, replacing a previous value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Data handed to the template engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    pub page_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<Post>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
}

impl ViewContext {
    fn from_listing(listing: Listing) -> Self {
        Self {
            page_title: listing.title,
            posts: Some(listing.posts),
            page_info: Some(listing.page_info),
            search_term: listing.search_term,
            ..Self::default()
        }
    }
}

/// What the hosting HTTP layer should send back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewResponse {
    Render {
        template: &'static str,
        context: ViewContext,
    },
    NotFound,
    Redirect {
        location: String,
    },
}

/// Dispatches one request.
///
/// # Errors
/// - Returns storage failures unchanged; everything else is a response.
pub fn handle<R: ContentRepository>(
    service: &ContentQueryService<R>,
    request: &Request,
) -> RepoResult<ViewResponse> {
    let Some(route) = Route::resolve(&request.path) else {
        info!("event=view_dispatch module=view status=not_found reason=no_route");
        return Ok(ViewResponse::NotFound);
    };

    let cursor = PageCursor::parse(request.param("page"));
    let outcome = match route {
        Route::Index => service.list_all(cursor).map(render_listing),
        Route::CreatedBy(author_id) => service
            .list_by_author(author_id, cursor)
            .map(render_listing),
        Route::Category(slug) => service.list_by_category(&slug, cursor).map(render_listing),
        Route::Tag(slug) => service.list_by_tag(&slug, cursor).map(render_listing),
        Route::Search => {
            let term = request.param("search").unwrap_or_default();
            service.search(term).map(|outcome| match outcome {
                QueryOutcome::Listing(listing) => render_listing(listing),
                QueryOutcome::RedirectToIndex => ViewResponse::Redirect {
                    location: INDEX_PATH.to_string(),
                },
            })
        }
        Route::Page(slug) => service.get_page(&slug).map(|page| ViewResponse::Render {
            template: PAGE_TEMPLATE,
            context: ViewContext {
                page_title: page.title.clone(),
                page: Some(page),
                ..ViewContext::default()
            },
        }),
        Route::Post(slug) => service.get_post(&slug).map(|post| ViewResponse::Render {
            template: POST_TEMPLATE,
            context: ViewContext {
                page_title: post.title.clone(),
                post: Some(post),
                ..ViewContext::default()
            },
        }),
    };

    into_response(outcome)
}

fn render_listing(listing: Listing) -> ViewResponse {
    ViewResponse::Render {
        template: INDEX_TEMPLATE,
        context: ViewContext::from_listing(listing),
    }
}

fn into_response(outcome: QueryResult<ViewResponse>) -> RepoResult<ViewResponse> {
    match outcome {
        Ok(response) => Ok(response),
        Err(QueryError::NotFound(missing)) => {
            info!("event=view_dispatch module=view status=not_found missing=\"{missing}\"");
            Ok(ViewResponse::NotFound)
        }
        Err(QueryError::Repo(err)) => Err(err),
    }
}
