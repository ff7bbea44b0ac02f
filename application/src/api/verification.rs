//! Verification-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, read};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// Verification `Request` of a `Broker`.
#[derive(Clone, Debug, From)]
pub struct Request(domain::verification::Request);

/// Verification `Request` of a `Broker`.
#[graphql_object(name = "VerificationRequest", context = Context)]
impl Request {
    /// Unique identifier of this `VerificationRequest`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Broker` this `VerificationRequest` belongs to.
    #[must_use]
    pub fn broker(&self) -> api::Broker {
        #[expect(
            unsafe_code,
            reason = "`Request` loaded from repository guarantees `Broker` \
                      existence"
        )]
        unsafe {
            api::Broker::new_unchecked(self.0.broker_id)
        }
    }

    /// Status of this `VerificationRequest`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// URLs of the documents submitted with this `VerificationRequest`.
    #[must_use]
    pub fn document_urls(&self) -> Vec<api::Url> {
        self.0.document_urls.iter().cloned().map(Into::into).collect()
    }

    /// Administrator notes left on this `VerificationRequest`.
    #[must_use]
    pub fn notes(&self) -> Option<Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// `DateTime` when this `VerificationRequest` was submitted.
    #[must_use]
    pub fn submitted_at(&self) -> DateTime {
        self.0.submitted_at.coerce()
    }

    /// `DateTime` when this `VerificationRequest` was decided.
    #[must_use]
    pub fn decided_at(&self) -> Option<DateTime> {
        self.0.decided_at.map(|at| at.coerce())
    }
}

/// Verification overview of a `Broker`: the current status, the latest
/// administrator notes, and the full `VerificationRequest` history, newest
/// first.
#[derive(Clone, Debug, From)]
pub struct Overview(read::verification::Status);

/// Verification overview of a `Broker`.
#[graphql_object(name = "VerificationOverview", context = Context)]
impl Overview {
    /// Current verification status of the `Broker`.
    #[must_use]
    pub fn current(&self) -> Status {
        self.0.current.into()
    }

    /// Latest administrator notes, if any decided `VerificationRequest`
    /// carries them.
    #[must_use]
    pub fn notes(&self) -> Option<Notes> {
        self.0.notes.clone().map(Into::into)
    }

    /// Full `VerificationRequest` history, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<Request> {
        self.0.history.iter().cloned().map(Into::into).collect()
    }
}

/// Verification status of a `Broker`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "VerificationStatus")]
pub enum Status {
    /// No verification request has ever been submitted.
    Unsubmitted,

    /// A verification request awaits an admin decision.
    UnderReview,

    /// The `Broker` is verified and publicly listed.
    Verified,

    /// The last verification request was rejected.
    Rejected,

    /// An admin requested additional documents.
    NeedsMoreDocs,
}

impl From<domain::verification::Status> for Status {
    fn from(status: domain::verification::Status) -> Self {
        use domain::verification::Status as S;

        match status {
            S::Unsubmitted => Self::Unsubmitted,
            S::UnderReview => Self::UnderReview,
            S::Verified => Self::Verified,
            S::Rejected => Self::Rejected,
            S::NeedsMoreDocs => Self::NeedsMoreDocs,
        }
    }
}

/// Administrator decision upon a `VerificationRequest`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "VerificationDecision")]
pub enum Decision {
    /// Credentials are confirmed.
    Verified,

    /// Credentials are rejected.
    Rejected,

    /// Additional documents are required.
    NeedsMoreDocs,
}

impl From<Decision> for domain::verification::Decision {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Verified => Self::Verified,
            Decision::Rejected => Self::Rejected,
            Decision::NeedsMoreDocs => Self::NeedsMoreDocs,
        }
    }
}

/// Unique identifier of a `VerificationRequest`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::verification::Id)]
#[into(domain::verification::Id)]
#[graphql(name = "VerificationRequestId", transparent)]
pub struct Id(Uuid);

/// Administrator notes on a `VerificationRequest`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "VerificationNotes",
    with = scalar::Via::<domain::verification::Notes>,
)]
pub struct Notes(domain::verification::Notes);
