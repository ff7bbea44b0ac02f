//! [`SubstringPattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// `ILIKE` pattern matching the input anywhere inside a column value.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct SubstringPattern(String);

impl SubstringPattern {
    /// Creates a new [`SubstringPattern`] out of the given `input`.
    ///
    /// `ILIKE` metacharacters of the `input` are escaped, so match
    /// themselves literally.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "%{}%",
            input
                .replace('\\', r"\\")
                .replace('%', r"\%")
                .replace('_', r"\_"),
        ))
    }
}

#[cfg(test)]
mod spec {
    use super::SubstringPattern;

    #[test]
    fn wraps_input() {
        assert_eq!(
            SubstringPattern::new("Marina").to_string(),
            "%Marina%",
        );
    }

    #[test]
    fn escapes_metacharacters() {
        assert_eq!(
            SubstringPattern::new(r"100%_\done").to_string(),
            r"%100\%\_\\done%",
        );
    }
}
