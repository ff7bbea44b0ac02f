//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, NumericText};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{broker, Url};

/// Property listing offered by a [`Broker`].
///
/// [`Broker`]: crate::domain::Broker
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// ID of the [`Broker`] owning this [`Listing`].
    ///
    /// [`Broker`]: crate::domain::Broker
    pub broker_id: broker::Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Option<Description>,

    /// [`Kind`] of the deal offered by this [`Listing`].
    pub kind: Kind,

    /// [`PropertyKind`] of this [`Listing`].
    pub property_kind: PropertyKind,

    /// [`Location`] of this [`Listing`].
    pub location: Location,

    /// Number of bedrooms, where `0` denotes a studio.
    pub bedrooms: Option<Bedrooms>,

    /// Number of bathrooms.
    pub bathrooms: Option<Bathrooms>,

    /// [`Furnishing`] of this [`Listing`].
    pub furnishing: Option<Furnishing>,

    /// Human-readable price of this [`Listing`], like `AED 2,500,000`.
    ///
    /// The derived numeric value backs range filtering and price sorting.
    pub price: NumericText,

    /// Human-readable area of this [`Listing`], like `1,450 sq ft`.
    pub area: Option<NumericText>,

    /// [`Amenity`] tags of this [`Listing`].
    pub amenities: Vec<Amenity>,

    /// Photo [`Url`]s of this [`Listing`].
    pub photo_urls: Vec<Url>,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// Indicator whether this [`Listing`] is featured.
    pub featured: bool,

    /// Number of times this [`Listing`] was viewed.
    pub view_count: ViewCount,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Listing`].
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

define_kind! {
    #[doc = "Kind of a deal offered by a [`Listing`]."]
    enum Kind {
        #[doc = "A property for sale."]
        Sale = 1,

        #[doc = "A property for rent."]
        Rental = 2,

        #[doc = "An off-plan property sold before completion."]
        OffPlan = 3,
    }
}

define_kind! {
    #[doc = "Kind of a property offered by a [`Listing`]."]
    enum PropertyKind {
        #[doc = "An apartment."]
        Apartment = 1,

        #[doc = "A villa."]
        Villa = 2,

        #[doc = "A townhouse."]
        Townhouse = 3,

        #[doc = "A penthouse."]
        Penthouse = 4,

        #[doc = "An office space."]
        Office = 5,

        #[doc = "A land plot."]
        Land = 6,
    }
}

define_kind! {
    #[doc = "Furnishing of a [`Listing`]."]
    enum Furnishing {
        #[doc = "Fully furnished."]
        Furnished = 1,

        #[doc = "Not furnished."]
        Unfurnished = 2,

        #[doc = "Partly furnished."]
        PartlyFurnished = 3,
    }
}

define_kind! {
    #[doc = "Status of a [`Listing`]."]
    enum Status {
        #[doc = "Available and shown in search results."]
        Available = 1,

        #[doc = "Sold to a buyer."]
        Sold = 2,

        #[doc = "Rented out to a tenant."]
        Rented = 3,

        #[doc = "Withdrawn by the broker."]
        Withdrawn = 4,
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 8192
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Location of a [`Listing`], like a city district or a community name.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `location` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Amenity tag of a [`Listing`], like `Pool` or `Covered Parking`.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Amenity(String);

impl Amenity {
    /// Creates a new [`Amenity`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `tag` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Creates a new [`Amenity`] if the given `tag` is valid.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        Self::check(&tag).then_some(Self(tag))
    }

    /// Checks whether the given `tag` is a valid [`Amenity`].
    fn check(tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref();
        tag.trim() == tag && !tag.is_empty() && tag.len() <= 128
    }
}

impl FromStr for Amenity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Amenity`")
    }
}

/// Number of bedrooms in a [`Listing`].
pub type Bedrooms = u16;

/// Number of bathrooms in a [`Listing`].
pub type Bathrooms = u16;

/// Number of times a [`Listing`] was viewed.
pub type ViewCount = u32;

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;
