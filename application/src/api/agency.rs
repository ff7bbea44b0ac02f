//! [`Agency`]-related definitions.

use common::DateTime;
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

/// A real-estate [`Agency`].
#[derive(Clone, Debug, From)]
pub struct Agency {
    /// ID of this [`Agency`].
    pub id: Id,

    /// [`domain::Agency`] representing this [`Agency`].
    agency: OnceCell<domain::Agency>,
}

impl From<domain::Agency> for Agency {
    fn from(agency: domain::Agency) -> Self {
        Self {
            id: agency.id.into(),
            agency: OnceCell::new_with(Some(agency)),
        }
    }
}

impl Agency {
    /// Creates a new [`Agency`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Agency`] with the provided ID exists,
    /// otherwise accessing this [`Agency`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            agency: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Agency`] representing this [`Agency`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Agency`] doesn't exist.
    async fn agency(&self, ctx: &Context) -> Result<&domain::Agency, Error> {
        let id = self.id.into();
        self.agency
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::agency::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|a| {
                        future::ready(a.ok_or_else(|| {
                            api::query::AgencyError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A real-estate `Agency`.
#[graphql_object(context = Context)]
impl Agency {
    /// Unique identifier of this `Agency`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Agency.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Agency`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Agency.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.agency(ctx).await?.name.clone().into())
    }

    /// Description of this `Agency`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Agency.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Option<Description>, Error> {
        Ok(self.agency(ctx).await?.description.clone().map(Into::into))
    }

    /// Website of this `Agency`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Agency.website",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn website(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Url>, Error> {
        Ok(self.agency(ctx).await?.website.clone().map(Into::into))
    }

    /// `DateTime` when this `Agency` was registered.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Agency.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.agency(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of an `Agency`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::agency::Id)]
#[into(domain::agency::Id)]
#[graphql(name = "AgencyId", transparent)]
pub struct Id(Uuid);

/// Name of an `Agency`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AgencyName",
    with = scalar::Via::<domain::agency::Name>,
)]
pub struct Name(domain::agency::Name);

/// Description of an `Agency`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AgencyDescription",
    with = scalar::Via::<domain::agency::Description>,
)]
pub struct Description(domain::agency::Description);
