//! [`Broker`]-related definitions.

use common::{DateTime, Percent};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`Broker`] profile.
#[derive(Clone, Debug, From)]
pub struct Broker {
    /// ID of this [`Broker`].
    pub id: Id,

    /// [`domain::Broker`] representing this [`Broker`].
    broker: OnceCell<domain::Broker>,
}

impl From<domain::Broker> for Broker {
    fn from(broker: domain::Broker) -> Self {
        Self {
            id: broker.id.into(),
            broker: OnceCell::new_with(Some(broker)),
        }
    }
}

impl Broker {
    /// Creates a new [`Broker`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Broker`] with the provided ID exists,
    /// otherwise accessing this [`Broker`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            broker: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Broker`] representing this [`Broker`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Broker`] doesn't exist.
    async fn broker(&self, ctx: &Context) -> Result<&domain::Broker, Error> {
        let id = self.id.into();
        self.broker
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::broker::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|b| {
                        future::ready(b.ok_or_else(|| {
                            api::query::BrokerError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// Returns the [`domain::Broker`] profile owned by the current session
/// `User`.
///
/// # Errors
///
/// Errors if the request is not authorized, or the `User` has no `Broker`
/// profile.
pub(crate) async fn require_own(
    ctx: &Context,
) -> Result<domain::Broker, Error> {
    let my_id = ctx.current_session().await?.user_id;
    ctx.service()
        .execute(query::broker::ByUserId::by(my_id.into()))
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())?
        .ok_or_else(|| api::PrivilegeError::Broker.into())
        .map_err(ctx.error())
}

/// A `Broker` profile.
#[graphql_object(context = Context)]
impl Broker {
    /// Unique identifier of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `User` owning this `Broker` profile.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.user",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn user(&self, ctx: &Context) -> Result<api::User, Error> {
        let user_id = self.broker(ctx).await?.user_id;
        #[expect(
            unsafe_code,
            reason = "`Broker` loaded from repository guarantees `User` \
                      existence"
        )]
        let user = unsafe { api::User::new_unchecked(user_id) };
        Ok(user)
    }

    /// `Agency` this `Broker` belongs to.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.agency",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn agency(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Agency>, Error> {
        let agency_id = self.broker(ctx).await?.agency_id;
        #[expect(
            unsafe_code,
            reason = "`Broker` loaded from repository guarantees `Agency` \
                      existence"
        )]
        let agency =
            agency_id.map(|id| unsafe { api::Agency::new_unchecked(id) });
        Ok(agency)
    }

    /// Public name of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Option<Name>, Error> {
        Ok(self.broker(ctx).await?.name.clone().map(Into::into))
    }

    /// Contact phone of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn phone(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::user::Phone>, Error> {
        Ok(self.broker(ctx).await?.phone.clone().map(Into::into))
    }

    /// Contact email of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::user::Email>, Error> {
        Ok(self.broker(ctx).await?.email.clone().map(Into::into))
    }

    /// Biography of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.bio",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bio(&self, ctx: &Context) -> Result<Option<Bio>, Error> {
        Ok(self.broker(ctx).await?.bio.clone().map(Into::into))
    }

    /// Photo of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.photoUrl",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn photo_url(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Url>, Error> {
        Ok(self.broker(ctx).await?.photo_url.clone().map(Into::into))
    }

    /// License number of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.licenseNumber",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn license_number(
        &self,
        ctx: &Context,
    ) -> Result<Option<LicenseNumber>, Error> {
        Ok(self
            .broker(ctx)
            .await?
            .license_number
            .clone()
            .map(Into::into))
    }

    /// Registration ID of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.registrationId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn registration_id(
        &self,
        ctx: &Context,
    ) -> Result<Option<RegistrationId>, Error> {
        Ok(self
            .broker(ctx)
            .await?
            .registration_id
            .clone()
            .map(Into::into))
    }

    /// Years of experience of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.yearsOfExperience",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn years_of_experience(
        &self,
        ctx: &Context,
    ) -> Result<Option<i32>, Error> {
        Ok(self.broker(ctx).await?.years_of_experience.map(i32::from))
    }

    /// Languages spoken by this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.languages",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn languages(
        &self,
        ctx: &Context,
    ) -> Result<Vec<Language>, Error> {
        Ok(self
            .broker(ctx)
            .await?
            .languages
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Verification status of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.verification",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn verification(
        &self,
        ctx: &Context,
    ) -> Result<api::verification::Status, Error> {
        Ok(self.broker(ctx).await?.verification.into())
    }

    /// Profile completeness of this `Broker`, in percent.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.completeness",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn completeness(&self, ctx: &Context) -> Result<Percent, Error> {
        Ok(self.broker(ctx).await?.completeness)
    }

    /// `DateTime` when this `Broker` profile was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.broker(ctx).await?.created_at.coerce())
    }

    /// Fetches the page of `Review`s left for this `Broker`, newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.reviews",
            limit = ?limit,
            offset = ?offset,
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn reviews(
        &self,
        limit: Option<i32>,
        offset: Option<i32>,
        ctx: &Context,
    ) -> Result<api::review::list::Page, Error> {
        api::review::list::select(ctx, self.id, limit, offset).await
    }

    /// Aggregated rating of this `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Broker.reviewSummary",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn review_summary(
        &self,
        ctx: &Context,
    ) -> Result<api::review::Summary, Error> {
        ctx.service()
            .execute(query::reviews::Summary::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

/// Unique identifier of a `Broker`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::broker::Id)]
#[into(domain::broker::Id)]
#[graphql(name = "BrokerId", transparent)]
pub struct Id(Uuid);

/// Public name of a `Broker`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BrokerName",
    with = scalar::Via::<domain::broker::Name>,
)]
pub struct Name(domain::broker::Name);

/// Biography of a `Broker`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BrokerBio",
    with = scalar::Via::<domain::broker::Bio>,
)]
pub struct Bio(domain::broker::Bio);

/// License number of a `Broker`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BrokerLicenseNumber",
    with = scalar::Via::<domain::broker::LicenseNumber>,
)]
pub struct LicenseNumber(domain::broker::LicenseNumber);

/// Registration ID of a `Broker`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BrokerRegistrationId",
    with = scalar::Via::<domain::broker::RegistrationId>,
)]
pub struct RegistrationId(domain::broker::RegistrationId);

/// Language spoken by a `Broker`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "BrokerLanguage",
    with = scalar::Via::<domain::broker::Language>,
)]
pub struct Language(domain::broker::Language);

pub mod directory {
    //! Definitions related to the public [`Broker`] directory.

    use derive_more::From;
    use juniper::graphql_object;
    use service::read;

    use crate::{AsError, Context, Error};

    use super::Broker;

    /// Page of the public `Broker` directory.
    #[derive(Clone, Debug, From)]
    pub struct Page(read::broker::directory::Page);

    /// Page of the public `Broker` directory.
    #[graphql_object(name = "BrokerDirectoryPage", context = Context)]
    impl Page {
        /// `Broker`s of this page.
        #[must_use]
        pub fn items(&self) -> Vec<Broker> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total number of `Broker`s matching the selection.
        pub fn total(&self) -> Result<i32, Error> {
            i32::try_from(self.0.total).map_err(AsError::into_error)
        }

        /// Indicator whether more `Broker`s exist beyond this page.
        #[must_use]
        pub fn has_more(&self) -> bool {
            self.0.has_more
        }
    }
}
