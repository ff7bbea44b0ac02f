//! [`Url`] definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

/// HTTP(S) URL pointing to an external resource, like a photo or an
/// uploaded document.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`Url`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Url`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.trim() == url
            && url.len() <= 2048
            && (url.strip_prefix("https://"))
                .or_else(|| url.strip_prefix("http://"))
                .is_some_and(|rest| !rest.is_empty())
    }
}

impl FromStr for Url {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Url`")
    }
}

#[cfg(test)]
mod spec {
    use super::Url;

    #[test]
    fn accepts_http_schemes() {
        assert!(Url::new("https://cdn.example.com/doc.pdf").is_some());
        assert!(Url::new("http://example.com/photo.jpg").is_some());
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(Url::new("ftp://example.com/doc.pdf"), None);
        assert_eq!(Url::new("example.com/doc.pdf"), None);
        assert_eq!(Url::new("https://"), None);
    }
}
