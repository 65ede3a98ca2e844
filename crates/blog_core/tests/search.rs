mod common;

use blog_core::db::{contains_ci, open_db_in_memory};
use blog_core::{
    Author, AuthorId, Category, ContentQueryService, ContentRepository, ListingKind, Page,
    PageCursor, Post, PostFilter, QueryOutcome, RepoError, RepoResult, SqliteContentRepository,
    Tag, Window, PER_PAGE,
};
use common::post;

/// Repository that fails on any access, proving a code path skips storage.
struct UntouchableRepository;

fn touched<T>() -> RepoResult<T> {
    Err(RepoError::InvalidData("storage was touched".to_string()))
}

impl ContentRepository for UntouchableRepository {
    fn count_published_posts(&self, _filter: &PostFilter<'_>) -> RepoResult<u64> {
        touched()
    }

    fn list_published_posts(
        &self,
        _filter: &PostFilter<'_>,
        _window: Window,
    ) -> RepoResult<Vec<Post>> {
        touched()
    }

    fn find_published_post(&self, _slug: &str) -> RepoResult<Option<Post>> {
        touched()
    }

    fn find_published_page(&self, _slug: &str) -> RepoResult<Option<Page>> {
        touched()
    }

    fn find_author(&self, _id: AuthorId) -> RepoResult<Option<Author>> {
        touched()
    }

    fn find_category(&self, _slug: &str) -> RepoResult<Option<Category>> {
        touched()
    }

    fn find_tag(&self, _slug: &str) -> RepoResult<Option<Tag>> {
        touched()
    }
}

fn mentions(post: &Post, term: &str) -> bool {
    [&post.title, &post.excerpt, &post.content]
        .iter()
        .any(|field| contains_ci(field, term))
}

fn listing(outcome: QueryOutcome) -> blog_core::Listing {
    outcome.into_listing().expect("search should produce a listing")
}

#[test]
fn blank_search_redirects_without_touching_storage() {
    let service = ContentQueryService::new(UntouchableRepository);

    assert_eq!(service.search("").unwrap(), QueryOutcome::RedirectToIndex);
    assert_eq!(service.search("   \t").unwrap(), QueryOutcome::RedirectToIndex);
    assert_eq!(
        service
            .list(ListingKind::Search(" ".to_string()), PageCursor::Number(3))
            .unwrap(),
        QueryOutcome::RedirectToIndex
    );
}

#[test]
fn search_matches_any_field_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    post("in-title").title("Learning RUST").insert(&conn);
    post("in-excerpt").excerpt("a rusty bike").insert(&conn);
    post("in-content").content("Trust the process").insert(&conn);
    post("unrelated").title("Go").excerpt("gophers").insert(&conn);
    post("draft").title("Rust draft").draft().insert(&conn);

    let service = ContentQueryService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let result = listing(service.search("  rust ").unwrap());

    let slugs = result
        .posts
        .iter()
        .map(|post| post.slug.as_str())
        .collect::<Vec<_>>();
    assert_eq!(slugs, vec!["in-content", "in-excerpt", "in-title"]);
    assert_eq!(result.search_term.as_deref(), Some("rust"));
    assert_eq!(result.title, "rust");
    assert!(result.posts.iter().all(|post| mentions(post, "rust")));
}

#[test]
fn search_is_capped_at_one_page_and_ignores_cursor() {
    let conn = open_db_in_memory().unwrap();
    for idx in 0..15 {
        post(&format!("match-{idx}")).content("needle inside").insert(&conn);
    }

    let service = ContentQueryService::new(SqliteContentRepository::try_new(&conn).unwrap());
    let result = listing(
        service
            .list(ListingKind::Search("needle".to_string()), PageCursor::Number(2))
            .unwrap(),
    );

    assert_eq!(result.posts.len(), PER_PAGE as usize);
    assert_eq!(result.posts[0].slug, "match-14");
    assert_eq!(result.page_info.number, 1);
    assert_eq!(result.page_info.num_pages, 1);
    assert!(!result.page_info.has_next);
}

#[test]
fn search_title_truncates_long_terms() {
    let conn = open_db_in_memory().unwrap();
    let service = ContentQueryService::new(SqliteContentRepository::try_new(&conn).unwrap());

    let term = "abcdefghijklmnopqrstuvwxyz0123456789";
    let result = listing(service.search(term).unwrap());
    assert_eq!(result.title, "abcdefghijklmnopqrstuvwxyz0123");
    assert_eq!(result.search_term.as_deref(), Some(term));
    assert!(result.posts.is_empty());
}

#[test]
fn search_treats_wildcard_characters_literally() {
    let conn = open_db_in_memory().unwrap();
    post("percent").title("100% done").insert(&conn);
    post("plain").title("nothing special").insert(&conn);
    post("underscore").title("snake_case names").insert(&conn);

    let service = ContentQueryService::new(SqliteContentRepository::try_new(&conn).unwrap());

    let percent = listing(service.search("%").unwrap());
    assert_eq!(percent.posts.len(), 1);
    assert_eq!(percent.posts[0].slug, "percent");

    let underscore = listing(service.search("_").unwrap());
    assert_eq!(underscore.posts.len(), 1);
    assert_eq!(underscore.posts[0].slug, "underscore");
}

#[test]
fn search_folds_non_ascii_case() {
    let conn = open_db_in_memory().unwrap();
    post("cafe").title("Le café du coin").insert(&conn);
    post("uber").excerpt("ÜBER den Wolken").insert(&conn);
    post("plain-cafe").title("cafe without accent").insert(&conn);

    let service = ContentQueryService::new(SqliteContentRepository::try_new(&conn).unwrap());

    let cafe = listing(service.search("CAFÉ").unwrap());
    let slugs = cafe
        .posts
        .iter()
        .map(|post| post.slug.as_str())
        .collect::<Vec<_>>();
    assert_eq!(slugs, vec!["cafe"]);
    assert!(cafe.posts.iter().all(|post| mentions(post, "CAFÉ")));

    let uber = listing(service.search("über").unwrap());
    assert_eq!(uber.posts.len(), 1);
    assert_eq!(uber.posts[0].slug, "uber");
}
