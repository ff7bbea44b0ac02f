//! [`Broker`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{agency, user, verification, Url};

/// Broker profile of a [`User`] with the [`user::Role::Broker`] role.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Broker {
    /// ID of this [`Broker`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Broker`] profile.
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the [`Agency`] this [`Broker`] is affiliated with.
    ///
    /// [`Agency`]: crate::domain::Agency
    pub agency_id: Option<agency::Id>,

    /// Public [`Name`] of this [`Broker`].
    pub name: Option<Name>,

    /// Contact [`user::Phone`] of this [`Broker`].
    pub phone: Option<user::Phone>,

    /// Contact [`user::Email`] of this [`Broker`].
    pub email: Option<user::Email>,

    /// [`Bio`] of this [`Broker`].
    pub bio: Option<Bio>,

    /// Photo [`Url`] of this [`Broker`].
    pub photo_url: Option<Url>,

    /// [`LicenseNumber`] of this [`Broker`].
    pub license_number: Option<LicenseNumber>,

    /// [`RegistrationId`] of this [`Broker`].
    pub registration_id: Option<RegistrationId>,

    /// Years of experience of this [`Broker`].
    pub years_of_experience: Option<YearsOfExperience>,

    /// [`Language`]s this [`Broker`] speaks.
    pub languages: Vec<Language>,

    /// [`verification::Status`] of this [`Broker`].
    ///
    /// Only [`verification::Status::Verified`] [`Broker`]s appear in the
    /// public directory.
    pub verification: verification::Status,

    /// Completeness of this [`Broker`] profile.
    pub completeness: Percent,

    /// [`DateTime`] when this [`Broker`] profile was created.
    pub created_at: CreationDateTime,
}

impl Broker {
    /// Number of profile fields contributing to the [`completeness`] score.
    ///
    /// [`completeness`]: Broker::completeness
    const COMPLETENESS_FIELDS: usize = 10;

    /// Computes the completeness of this [`Broker`] profile as the share of
    /// its filled fields.
    #[must_use]
    pub fn completeness(&self) -> Percent {
        let filled = [
            self.name.is_some(),
            self.phone.is_some(),
            self.email.is_some(),
            self.bio.is_some(),
            self.photo_url.is_some(),
            self.license_number.is_some(),
            self.registration_id.is_some(),
            self.years_of_experience.is_some(),
            !self.languages.is_empty(),
            self.agency_id.is_some(),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count();

        Percent::from_ratio(filled, Self::COMPLETENESS_FIELDS)
    }
}

/// ID of a [`Broker`].
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

/// Public name of a [`Broker`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Bio of a [`Broker`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Bio(String);

impl Bio {
    /// Creates a new [`Bio`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Bio`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Bio`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 4096
    }
}

impl FromStr for Bio {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Bio`")
    }
}

/// License number of a [`Broker`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct LicenseNumber(String);

impl LicenseNumber {
    /// Creates a new [`LicenseNumber`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`LicenseNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`LicenseNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number && !number.is_empty() && number.len() <= 64
    }
}

impl FromStr for LicenseNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `LicenseNumber`")
    }
}

/// Registration ID of a [`Broker`] in the brokers registry.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Creates a new [`RegistrationId`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`RegistrationId`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`RegistrationId`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for RegistrationId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `RegistrationId`")
    }
}

/// Language a [`Broker`] speaks.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Language(String);

impl Language {
    /// Creates a new [`Language`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `language` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(language: impl Into<String>) -> Self {
        Self(language.into())
    }

    /// Creates a new [`Language`] if the given `language` is valid.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Option<Self> {
        let language = language.into();
        Self::check(&language).then_some(Self(language))
    }

    /// Checks whether the given `language` is a valid [`Language`].
    fn check(language: impl AsRef<str>) -> bool {
        let language = language.as_ref();
        language.trim() == language
            && !language.is_empty()
            && language.len() <= 64
    }
}

impl FromStr for Language {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Language`")
    }
}

/// Years of experience of a [`Broker`].
pub type YearsOfExperience = u16;

/// [`DateTime`] when a [`Broker`] profile was created.
pub type CreationDateTime = DateTimeOf<(Broker, unit::Creation)>;

#[cfg(test)]
mod spec {
    use common::{DateTimeOf, Percent};
    use rust_decimal::Decimal;

    use crate::domain::{broker, user, verification, Broker};

    fn empty_profile() -> Broker {
        Broker {
            id: broker::Id::new(),
            user_id: user::Id::new(),
            agency_id: None,
            name: None,
            phone: None,
            email: None,
            bio: None,
            photo_url: None,
            license_number: None,
            registration_id: None,
            years_of_experience: None,
            languages: Vec::new(),
            verification: verification::Status::Unsubmitted,
            completeness: Percent::new(Decimal::ZERO).unwrap(),
            created_at: DateTimeOf::now(),
        }
    }

    #[test]
    fn empty_profile_is_incomplete() {
        assert_eq!(
            empty_profile().completeness(),
            Percent::new(Decimal::ZERO).unwrap(),
        );
    }

    #[test]
    fn counts_filled_fields() {
        let mut profile = empty_profile();
        profile.name = broker::Name::new("Amina K.");
        profile.years_of_experience = Some(7);
        profile.languages = vec![broker::Language::new("Arabic").unwrap()];

        assert_eq!(
            profile.completeness(),
            Percent::new(Decimal::from(30)).unwrap(),
        );
    }
}
