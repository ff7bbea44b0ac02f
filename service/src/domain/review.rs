//! [`Review`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{broker, user};

/// Review a [`User`] left on a [`Broker`].
///
/// A [`User`] may review each [`Broker`] at most once.
///
/// [`Broker`]: crate::domain::Broker
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Review {
    /// ID of this [`Review`].
    pub id: Id,

    /// ID of the reviewed [`Broker`].
    ///
    /// [`Broker`]: crate::domain::Broker
    pub broker_id: broker::Id,

    /// ID of the [`User`] who authored this [`Review`].
    ///
    /// [`User`]: crate::domain::User
    pub author_id: user::Id,

    /// [`Rating`] of this [`Review`].
    pub rating: Rating,

    /// [`Comment`] of this [`Review`].
    pub comment: Option<Comment>,

    /// [`DateTime`] when this [`Review`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Review`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Rating of a [`Review`], from 1 to 5 stars.
#[derive(Clone, Copy, Debug, Display, Eq, Into, PartialEq)]
pub struct Rating(u8);

impl Rating {
    /// Minimum allowed [`Rating`] value.
    pub const MIN: u8 = 1;

    /// Maximum allowed [`Rating`] value.
    pub const MAX: u8 = 5;

    /// Creates a new [`Rating`] if the given `stars` are within bounds.
    #[must_use]
    pub fn new(stars: u8) -> Option<Self> {
        ((Self::MIN..=Self::MAX).contains(&stars)).then_some(Self(stars))
    }

    /// Creates a new [`Rating`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be within [`MIN`] and [`MAX`].
    ///
    /// [`MAX`]: Self::MAX
    /// [`MIN`]: Self::MIN
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(stars: u8) -> Self {
        Self(stars)
    }

    /// Converts this [`Rating`] into its [`u8`] representation.
    #[must_use]
    pub const fn u8(self) -> u8 {
        self.0
    }
}

/// Comment of a [`Review`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Comment(String);

impl Comment {
    /// Creates a new [`Comment`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Comment`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Comment`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 4096
    }
}

impl FromStr for Comment {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Comment`")
    }
}

/// [`DateTime`] when a [`Review`] was created.
pub type CreationDateTime = DateTimeOf<(Review, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Rating;

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(1).is_some());
        assert!(Rating::new(5).is_some());
        assert_eq!(Rating::new(0), None);
        assert_eq!(Rating::new(6), None);
    }
}
