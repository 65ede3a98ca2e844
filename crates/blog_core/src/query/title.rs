//! Display title rules for listings.

use crate::model::author::Author;

/// Title of the unfiltered listing.
pub const HOME_TITLE: &str = "Home";

/// Search titles keep at most this many characters of the term.
pub const SEARCH_TITLE_MAX_CHARS: usize = 30;

/// Title for an author's listing: `"{display_name} post"`.
pub fn author_title(author: &Author) -> String {
    format!("{} post", author.display_name())
}

/// Title for a search listing: the trimmed term cut to
/// [`SEARCH_TITLE_MAX_CHARS`] characters (not bytes).
pub fn search_title(term: &str) -> String {
    term.chars().take(SEARCH_TITLE_MAX_CHARS).collect()
}
