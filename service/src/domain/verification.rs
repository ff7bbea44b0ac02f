//! Broker verification definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Broker;
use crate::domain::{agency, broker, user, Url};

define_kind! {
    #[doc = "Verification status of a [`Broker`]."]
    enum Status {
        #[doc = "No verification [`Request`] has ever been submitted."]
        Unsubmitted = 1,

        #[doc = "A verification [`Request`] awaits an admin decision."]
        UnderReview = 2,

        #[doc = "The [`Broker`] is verified and publicly listed."]
        Verified = 3,

        #[doc = "The last verification [`Request`] was rejected."]
        Rejected = 4,

        #[doc = "An admin requested additional documents."]
        NeedsMoreDocs = 5,
    }
}

impl Status {
    /// Indicates whether this [`Status`] awaits an admin [`Decision`].
    #[must_use]
    pub fn is_pending(self) -> bool {
        self == Self::UnderReview
    }

    /// Indicates whether a [`Broker`] in this [`Status`] may submit a new
    /// verification [`Request`].
    ///
    /// Only a pending [`Request`] blocks submission. [`Status::Verified`]
    /// [`Broker`]s may resubmit to update their credentials.
    #[must_use]
    pub fn can_submit(self) -> bool {
        !self.is_pending()
    }
}

define_kind! {
    #[doc = "Admin decision upon a verification [`Request`]."]
    enum Decision {
        #[doc = "Credentials are confirmed."]
        Verified = 1,

        #[doc = "Credentials are rejected."]
        Rejected = 2,

        #[doc = "Additional documents are required."]
        NeedsMoreDocs = 3,
    }
}

impl Decision {
    /// Returns the [`Status`] a decided [`Request`] transitions into.
    #[must_use]
    pub fn status(self) -> Status {
        match self {
            Self::Verified => Status::Verified,
            Self::Rejected => Status::Rejected,
            Self::NeedsMoreDocs => Status::NeedsMoreDocs,
        }
    }
}

/// Verification request of a [`Broker`].
///
/// A point-in-time snapshot of the submitted credentials. A [`Broker`] may
/// accumulate many [`Request`]s over time, but at most one of them may be
/// pending at any moment.
#[derive(Clone, Debug)]
pub struct Request {
    /// ID of this [`Request`].
    pub id: Id,

    /// ID of the [`Broker`] this [`Request`] belongs to.
    pub broker_id: broker::Id,

    /// [`Status`] of this [`Request`].
    ///
    /// Never [`Status::Unsubmitted`].
    pub status: Status,

    /// [`Url`]s of the documents attached to this [`Request`].
    pub document_urls: Vec<Url>,

    /// [`Notes`] left by the deciding admin.
    pub notes: Option<Notes>,

    /// [`DateTime`] when this [`Request`] was submitted.
    pub submitted_at: SubmissionDateTime,

    /// [`DateTime`] when this [`Request`] was decided, if it was.
    pub decided_at: Option<DecisionDateTime>,
}

/// ID of a [`Request`].
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

/// Admin notes on a decided [`Request`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Notes(String);

impl Notes {
    /// Creates a new [`Notes`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `notes` match the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(notes: impl Into<String>) -> Self {
        Self(notes.into())
    }

    /// Creates a new [`Notes`] if the given `notes` are valid.
    #[must_use]
    pub fn new(notes: impl Into<String>) -> Option<Self> {
        let notes = notes.into();
        Self::check(&notes).then_some(Self(notes))
    }

    /// Checks whether the given `notes` are valid [`Notes`].
    fn check(notes: impl AsRef<str>) -> bool {
        let notes = notes.as_ref();
        !notes.trim().is_empty() && notes.len() <= 2048
    }
}

impl FromStr for Notes {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Notes`")
    }
}

/// Credentials a [`Broker`] submits for verification.
#[derive(Clone, Debug)]
pub struct Payload {
    /// Public [`broker::Name`] of the [`Broker`].
    pub name: Option<broker::Name>,

    /// Contact [`user::Phone`] of the [`Broker`].
    pub phone: Option<user::Phone>,

    /// Contact [`user::Email`] of the [`Broker`].
    pub email: Option<user::Email>,

    /// [`broker::Bio`] of the [`Broker`].
    pub bio: Option<broker::Bio>,

    /// Photo [`Url`] of the [`Broker`].
    pub photo_url: Option<Url>,

    /// [`broker::LicenseNumber`] of the [`Broker`].
    pub license_number: Option<broker::LicenseNumber>,

    /// [`broker::RegistrationId`] of the [`Broker`].
    pub registration_id: Option<broker::RegistrationId>,

    /// Years of experience of the [`Broker`].
    pub years_of_experience: Option<broker::YearsOfExperience>,

    /// [`broker::Language`]s the [`Broker`] speaks.
    pub languages: Vec<broker::Language>,

    /// ID of the [`Agency`] the [`Broker`] is affiliated with.
    ///
    /// [`Agency`]: crate::domain::Agency
    pub agency_id: Option<agency::Id>,

    /// [`Url`]s of the documents confirming the credentials.
    pub document_urls: Vec<Url>,
}

impl Payload {
    /// Minimum number of [`document_urls`] required for submission.
    ///
    /// [`document_urls`]: Payload::document_urls
    pub const MIN_DOCUMENTS: usize = 2;

    /// Returns the required [`Field`]s missing from this [`Payload`].
    ///
    /// An empty [`Vec`] means the [`Payload`] is complete enough to be
    /// submitted.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push(Field::Name);
        }
        if self.phone.is_none() && self.email.is_none() {
            missing.push(Field::Contact);
        }
        if self.photo_url.is_none() {
            missing.push(Field::Photo);
        }
        if self.license_number.is_none() {
            missing.push(Field::LicenseNumber);
        }
        if self.registration_id.is_none() {
            missing.push(Field::RegistrationId);
        }
        if self.years_of_experience.is_none() {
            missing.push(Field::YearsOfExperience);
        }
        if self.document_urls.len() < Self::MIN_DOCUMENTS {
            missing.push(Field::Documents);
        }
        missing
    }
}

define_kind! {
    #[doc = "Required field of a verification [`Payload`]."]
    enum Field {
        #[doc = "Public name of the broker."]
        Name = 1,

        #[doc = "Contact phone or email."]
        Contact = 2,

        #[doc = "Photo of the broker."]
        Photo = 3,

        #[doc = "License number."]
        LicenseNumber = 4,

        #[doc = "Registration ID."]
        RegistrationId = 5,

        #[doc = "Years of experience."]
        YearsOfExperience = 6,

        #[doc = "At least two document URLs."]
        Documents = 7,
    }
}

/// [`DateTime`] when a [`Request`] was submitted.
pub type SubmissionDateTime = DateTimeOf<(Request, unit::Submission)>;

/// [`DateTime`] when a [`Request`] was decided.
pub type DecisionDateTime = DateTimeOf<(Request, unit::Decision)>;

#[cfg(test)]
mod spec {
    use crate::domain::{broker, user, verification, Url};

    use super::{Decision, Field, Payload, Status};

    fn complete_payload() -> Payload {
        Payload {
            name: broker::Name::new("Amina K."),
            phone: user::Phone::new("+1 555 123 4567"),
            email: None,
            bio: None,
            photo_url: Url::new("https://cdn.example.com/amina.jpg"),
            license_number: broker::LicenseNumber::new("RERA-1234"),
            registration_id: broker::RegistrationId::new("BRN-5678"),
            years_of_experience: Some(7),
            languages: Vec::new(),
            agency_id: None,
            document_urls: vec![
                Url::new("https://cdn.example.com/license.pdf").unwrap(),
                Url::new("https://cdn.example.com/id.pdf").unwrap(),
            ],
        }
    }

    #[test]
    fn complete_payload_has_no_missing_fields() {
        assert_eq!(complete_payload().missing_fields(), Vec::new());
    }

    #[test]
    fn either_contact_satisfies_the_requirement() {
        let mut payload = complete_payload();
        payload.phone = None;
        payload.email = user::Email::new("amina@example.com");
        assert_eq!(payload.missing_fields(), Vec::new());

        payload.email = None;
        assert_eq!(payload.missing_fields(), vec![Field::Contact]);
    }

    #[test]
    fn requires_two_documents() {
        let mut payload = complete_payload();
        let _ = payload.document_urls.pop();
        assert_eq!(payload.missing_fields(), vec![Field::Documents]);
    }

    #[test]
    fn only_pending_status_blocks_submission() {
        assert!(!Status::UnderReview.can_submit());
        assert!(Status::Unsubmitted.can_submit());
        assert!(Status::Verified.can_submit());
        assert!(Status::Rejected.can_submit());
        assert!(Status::NeedsMoreDocs.can_submit());
    }

    #[test]
    fn decision_maps_to_status() {
        assert_eq!(Decision::Verified.status(), Status::Verified);
        assert_eq!(Decision::Rejected.status(), Status::Rejected);
        assert_eq!(Decision::NeedsMoreDocs.status(), Status::NeedsMoreDocs);
        assert!(!verification::Status::Rejected.is_pending());
    }
}
