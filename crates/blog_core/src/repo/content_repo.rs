//! Content repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Count and list published posts for one [`PostFilter`].
//! - Resolve single posts/pages by slug and taxonomy records by key.
//!
//! # Invariants
//! - Post/page reads always carry `is_published = 1`.
//! - Post listings are ordered by `id DESC` only, so page windows are stable.
//! - Search terms are matched literally and case-insensitively through the
//!   `contains_ci` function registered by [`crate::db::open_db`].

use crate::model::author::{Author, AuthorId};
use crate::model::page::Page;
use crate::model::post::Post;
use crate::model::taxonomy::{Category, Tag};
use crate::query::{PostFilter, Window};
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};

const REQUIRED_TABLES: [&str; 6] = ["authors", "categories", "tags", "posts", "post_tags", "pages"];

const POST_FROM_SQL: &str = "FROM posts p
LEFT JOIN authors a ON a.id = p.author_id
LEFT JOIN categories c ON c.id = p.category_id
WHERE p.is_published = 1";

const POST_COLUMNS_SQL: &str = "SELECT
    p.id AS id,
    p.slug AS slug,
    p.title AS title,
    p.excerpt AS excerpt,
    p.content AS content,
    p.is_published AS is_published,
    p.created_at AS created_at,
    a.id AS author_id,
    a.username AS author_username,
    a.first_name AS author_first_name,
    a.last_name AS author_last_name,
    c.id AS category_id,
    c.slug AS category_slug,
    c.name AS category_name";

/// Read-only access to published content.
pub trait ContentRepository {
    /// Counts published posts matching `filter`.
    fn count_published_posts(&self, filter: &PostFilter<'_>) -> RepoResult<u64>;
    /// Lists published posts matching `filter`, newest first, within `window`.
    fn list_published_posts(
        &self,
        filter: &PostFilter<'_>,
        window: Window,
    ) -> RepoResult<Vec<Post>>;
    /// Gets one published post by slug.
    fn find_published_post(&self, slug: &str) -> RepoResult<Option<Post>>;
    /// Gets one published page by slug.
    fn find_published_page(&self, slug: &str) -> RepoResult<Option<Page>>;
    fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_category(&self, slug: &str) -> RepoResult<Option<Category>>;
    fn find_tag(&self, slug: &str) -> RepoResult<Option<Tag>>;
}

/// SQLite-backed content repository.
pub struct SqliteContentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails fast when the content tables are absent, e.g. when handed a
    /// connection that skipped [`crate::db::open_db`].
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl ContentRepository for SqliteContentRepository<'_> {
    fn count_published_posts(&self, filter: &PostFilter<'_>) -> RepoResult<u64> {
        let mut sql = format!("SELECT COUNT(*) {POST_FROM_SQL}");
        let mut bind_values = Vec::new();
        push_filter(&mut sql, &mut bind_values, filter);

        let count: i64 =
            self.conn
                .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative post count `{count}`")))
    }

    fn list_published_posts(
        &self,
        filter: &PostFilter<'_>,
        window: Window,
    ) -> RepoResult<Vec<Post>> {
        if window.limit == 0 {
            return Ok(Vec::new());
        }

        let mut sql = format!("{POST_COLUMNS_SQL} {POST_FROM_SQL}");
        let mut bind_values = Vec::new();
        push_filter(&mut sql, &mut bind_values, filter);

        sql.push_str(" ORDER BY p.id DESC LIMIT ? OFFSET ?");
        bind_values.push(Value::Integer(i64::from(window.limit)));
        bind_values.push(Value::Integer(
            i64::try_from(window.offset).unwrap_or(i64::MAX),
        ));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(self.post_from_row(row)?);
        }

        Ok(posts)
    }

    fn find_published_post(&self, slug: &str) -> RepoResult<Option<Post>> {
        let sql = format!("{POST_COLUMNS_SQL} {POST_FROM_SQL} AND p.slug = ?1;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => Ok(Some(self.post_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_published_page(&self, slug: &str) -> RepoResult<Option<Page>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, slug, title, content, is_published
             FROM pages
             WHERE slug = ?1
               AND is_published = 1;",
        )?;
        let mut rows = stmt.query([slug])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        Ok(Some(Page {
            id: row.get("id")?,
            slug: row.get("slug")?,
            title: row.get("title")?,
            content: row.get("content")?,
            is_published: parse_flag(row.get("is_published")?, "pages.is_published")?,
        }))
    }

    fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                "SELECT id, username, first_name, last_name FROM authors WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Author {
                        id: row.get("id")?,
                        username: row.get("username")?,
                        first_name: row.get("first_name")?,
                        last_name: row.get("last_name")?,
                    })
                },
            )
            .optional()?;
        Ok(author)
    }

    fn find_category(&self, slug: &str) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, slug, name FROM categories WHERE slug = ?1;",
                [slug],
                |row| {
                    Ok(Category {
                        id: row.get("id")?,
                        slug: row.get("slug")?,
                        name: row.get("name")?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    fn find_tag(&self, slug: &str) -> RepoResult<Option<Tag>> {
        let tag = self
            .conn
            .query_row(
                "SELECT id, slug, name FROM tags WHERE slug = ?1;",
                [slug],
                tag_from_row,
            )
            .optional()?;
        Ok(tag)
    }
}

impl SqliteContentRepository<'_> {
    fn post_from_row(&self, row: &Row<'_>) -> RepoResult<Post> {
        let id: i64 = row.get("id")?;

        let author = match row.get::<_, Option<AuthorId>>("author_id")? {
            Some(author_id) => Some(Author {
                id: author_id,
                username: row.get("author_username")?,
                first_name: row.get("author_first_name")?,
                last_name: row.get("author_last_name")?,
            }),
            None => None,
        };

        let category = match row.get::<_, Option<i64>>("category_id")? {
            Some(category_id) => Some(Category {
                id: category_id,
                slug: row.get("category_slug")?,
                name: row.get("category_name")?,
            }),
            None => None,
        };

        Ok(Post {
            id,
            slug: row.get("slug")?,
            title: row.get("title")?,
            excerpt: row.get("excerpt")?,
            content: row.get("content")?,
            author,
            category,
            tags: load_tags_for_post(self.conn, id)?,
            is_published: parse_flag(row.get("is_published")?, "posts.is_published")?,
            created_at: row.get("created_at")?,
        })
    }
}

fn push_filter(sql: &mut String, bind_values: &mut Vec<Value>, filter: &PostFilter<'_>) {
    match *filter {
        PostFilter::All => {}
        PostFilter::Author(author_id) => {
            sql.push_str(" AND p.author_id = ?");
            bind_values.push(Value::Integer(author_id));
        }
        PostFilter::CategorySlug(slug) => {
            sql.push_str(" AND c.slug = ?");
            bind_values.push(Value::Text(slug.to_string()));
        }
        PostFilter::TagSlug(slug) => {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM post_tags pt
                    INNER JOIN tags t ON t.id = pt.tag_id
                    WHERE pt.post_id = p.id
                      AND t.slug = ?
                )",
            );
            bind_values.push(Value::Text(slug.to_string()));
        }
        PostFilter::Mentions(term) => {
            sql.push_str(
                " AND (contains_ci(p.title, ?)
                    OR contains_ci(p.excerpt, ?)
                    OR contains_ci(p.content, ?))",
            );
            for _ in 0..3 {
                bind_values.push(Value::Text(term.to_string()));
            }
        }
    }
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get("id")?,
        slug: row.get("slug")?,
        name: row.get("name")?,
    })
}

fn load_tags_for_post(conn: &Connection, post_id: i64) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.id AS id, t.slug AS slug, t.name AS name
         FROM post_tags pt
         INNER JOIN tags t ON t.id = pt.tag_id
         WHERE pt.post_id = ?1
         ORDER BY t.name COLLATE NOCASE ASC, t.id ASC;",
    )?;
    let tags = stmt
        .query_map([post_id], tag_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
