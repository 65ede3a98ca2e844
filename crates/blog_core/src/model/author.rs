//! Author read model.

use serde::Serialize;

/// Numeric author identifier as used in `/created_by/<id>/` routes.
pub type AuthorId = i64;

/// Account that wrote one or more posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: AuthorId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Author {
    /// Returns `"first last"` when a first name is set, otherwise the
    /// username.
    ///
    /// Blank name parts count as absent.
    pub fn display_name(&self) -> String {
        let first = non_blank(self.first_name.as_deref());
        let last = non_blank(self.last_name.as_deref());

        match (first, last) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, _) => self.username.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::Author;

    fn author(first: Option<&str>, last: Option<&str>) -> Author {
        Author {
            id: 1,
            username: "jdoe".to_string(),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(author(Some("Jane"), Some("Doe")).display_name(), "Jane Doe");
    }

    #[test]
    fn display_name_uses_first_name_alone() {
        assert_eq!(author(Some("Jane"), None).display_name(), "Jane");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(author(None, Some("Doe")).display_name(), "jdoe");
        assert_eq!(author(Some("  "), Some("Doe")).display_name(), "jdoe");
    }
}
