//! Scalar SQL functions registered on every content connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// Returns whether `needle` occurs in `haystack`, ignoring case with full
/// Unicode lowercasing (unlike SQLite `LIKE`, which only folds ASCII).
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Registers `contains_ci(haystack, needle)`; `NULL` haystacks never match.
pub(super) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "contains_ci",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: Option<String> = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(haystack.is_some_and(|value| contains_ci(&value, &needle)))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{contains_ci, register_functions};
    use rusqlite::Connection;

    #[test]
    fn contains_ci_folds_non_ascii_case() {
        assert!(contains_ci("Le café du coin", "CAFÉ"));
        assert!(contains_ci("ÜBER alles", "über"));
        assert!(!contains_ci("cafe", "café"));
    }

    #[test]
    fn registered_function_treats_wildcards_literally_and_null_as_no_match() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();

        let matched: bool = conn
            .query_row("SELECT contains_ci('100% done', '%');", [], |row| row.get(0))
            .unwrap();
        let unmatched: bool = conn
            .query_row("SELECT contains_ci('done', '_');", [], |row| row.get(0))
            .unwrap();
        let null_haystack: bool = conn
            .query_row("SELECT contains_ci(NULL, 'x');", [], |row| row.get(0))
            .unwrap();
        assert!(matched);
        assert!(!unmatched);
        assert!(!null_haystack);
    }
}
