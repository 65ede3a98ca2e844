#![allow(dead_code)]

use rusqlite::{params, Connection};

pub fn insert_author(
    conn: &Connection,
    username: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> i64 {
    conn.execute(
        "INSERT INTO authors (username, first_name, last_name) VALUES (?1, ?2, ?3);",
        params![username, first_name, last_name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_category(conn: &Connection, slug: &str, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO categories (slug, name) VALUES (?1, ?2);",
        params![slug, name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_tag(conn: &Connection, slug: &str, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO tags (slug, name) VALUES (?1, ?2);",
        params![slug, name],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn tag_post(conn: &Connection, post_id: i64, tag_id: i64) {
    conn.execute(
        "INSERT INTO post_tags (post_id, tag_id) VALUES (?1, ?2);",
        params![post_id, tag_id],
    )
    .unwrap();
}

pub fn insert_page(conn: &Connection, slug: &str, title: &str, published: bool) -> i64 {
    conn.execute(
        "INSERT INTO pages (slug, title, content, is_published) VALUES (?1, ?2, ?3, ?4);",
        params![slug, title, format!("{title} body"), published],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// Post row under construction; published by default.
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
    pub published: bool,
}

pub fn post(slug: &str) -> NewPost {
    NewPost {
        slug: slug.to_string(),
        title: format!("Title of {slug}"),
        excerpt: String::new(),
        content: String::new(),
        author_id: None,
        category_id: None,
        published: true,
    }
}

impl NewPost {
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = excerpt.to_string();
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn draft(mut self) -> Self {
        self.published = false;
        self
    }

    pub fn insert(self, conn: &Connection) -> i64 {
        conn.execute(
            "INSERT INTO posts (slug, title, excerpt, content, author_id, category_id, is_published)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                self.slug,
                self.title,
                self.excerpt,
                self.content,
                self.author_id,
                self.category_id,
                self.published,
            ],
        )
        .unwrap();
        conn.last_insert_rowid()
    }
}
