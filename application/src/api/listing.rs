//! [`Listing`]-related definitions.

use common::{DateTime, NumericText};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A property [`Listing`].
#[derive(Clone, Debug, From)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`domain::Listing`] representing this [`Listing`].
    listing: OnceCell<domain::Listing>,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.into(),
            listing: OnceCell::new_with(Some(listing)),
        }
    }
}

impl Listing {
    /// Creates a new [`Listing`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Listing`] with the provided ID exists,
    /// otherwise accessing this [`Listing`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            listing: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Listing`] representing this [`Listing`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Listing`] doesn't exist.
    async fn listing(&self, ctx: &Context) -> Result<&domain::Listing, Error> {
        let id = self.id.into();
        self.listing
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::listing::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(l.ok_or_else(|| {
                            api::query::ListingError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A property `Listing`.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `Broker` owning this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.broker",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn broker(&self, ctx: &Context) -> Result<api::Broker, Error> {
        let broker_id = self.listing(ctx).await?.broker_id;
        #[expect(
            unsafe_code,
            reason = "`Listing` loaded from repository guarantees `Broker` \
                      existence"
        )]
        let broker = unsafe { api::Broker::new_unchecked(broker_id) };
        Ok(broker)
    }

    /// Title of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.listing(ctx).await?.title.clone().into())
    }

    /// Description of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Option<Description>, Error> {
        Ok(self.listing(ctx).await?.description.clone().map(Into::into))
    }

    /// Kind of a deal offered by this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.listing(ctx).await?.kind.into())
    }

    /// Kind of a property offered by this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.propertyKind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property_kind(
        &self,
        ctx: &Context,
    ) -> Result<PropertyKind, Error> {
        Ok(self.listing(ctx).await?.property_kind.into())
    }

    /// Location of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.location",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn location(&self, ctx: &Context) -> Result<Location, Error> {
        Ok(self.listing(ctx).await?.location.clone().into())
    }

    /// Number of bedrooms of this `Listing`.
    ///
    /// `0` denotes a studio.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.bedrooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bedrooms(&self, ctx: &Context) -> Result<Option<i32>, Error> {
        Ok(self.listing(ctx).await?.bedrooms.map(i32::from))
    }

    /// Number of bathrooms of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.bathrooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bathrooms(&self, ctx: &Context) -> Result<Option<i32>, Error> {
        Ok(self.listing(ctx).await?.bathrooms.map(i32::from))
    }

    /// Furnishing of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.furnishing",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn furnishing(
        &self,
        ctx: &Context,
    ) -> Result<Option<Furnishing>, Error> {
        Ok(self.listing(ctx).await?.furnishing.map(Into::into))
    }

    /// Price tag of this `Listing`, as provided by the `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<NumericText, Error> {
        Ok(self.listing(ctx).await?.price.clone())
    }

    /// Area of this `Listing`, as provided by the `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.area",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn area(
        &self,
        ctx: &Context,
    ) -> Result<Option<NumericText>, Error> {
        Ok(self.listing(ctx).await?.area.clone())
    }

    /// Amenities of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.amenities",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn amenities(&self, ctx: &Context) -> Result<Vec<Amenity>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .amenities
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Photos of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.photoUrls",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn photo_urls(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Url>, Error> {
        Ok(self
            .listing(ctx)
            .await?
            .photo_urls
            .iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    /// Status of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.listing(ctx).await?.status.into())
    }

    /// Indicator whether this `Listing` is featured.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.featured",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn featured(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.listing(ctx).await?.featured)
    }

    /// Number of times this `Listing` has been viewed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.viewCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn view_count(&self, ctx: &Context) -> Result<i32, Error> {
        i32::try_from(self.listing(ctx).await?.view_count)
            .map_err(AsError::into_error)
    }

    /// `DateTime` when this `Listing` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.listing(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Listing`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Kind of a deal offered by a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingKind")]
pub enum Kind {
    /// A property for sale.
    Sale,

    /// A property for rent.
    Rental,

    /// An off-plan property sold before completion.
    OffPlan,
}

impl From<domain::listing::Kind> for Kind {
    fn from(kind: domain::listing::Kind) -> Self {
        use domain::listing::Kind as K;

        match kind {
            K::Sale => Self::Sale,
            K::Rental => Self::Rental,
            K::OffPlan => Self::OffPlan,
        }
    }
}

impl From<Kind> for domain::listing::Kind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Sale => Self::Sale,
            Kind::Rental => Self::Rental,
            Kind::OffPlan => Self::OffPlan,
        }
    }
}

/// Kind of a property offered by a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PropertyKind")]
pub enum PropertyKind {
    /// An apartment.
    Apartment,

    /// A villa.
    Villa,

    /// A townhouse.
    Townhouse,

    /// A penthouse.
    Penthouse,

    /// An office space.
    Office,

    /// A land plot.
    Land,
}

impl From<domain::listing::PropertyKind> for PropertyKind {
    fn from(kind: domain::listing::PropertyKind) -> Self {
        use domain::listing::PropertyKind as K;

        match kind {
            K::Apartment => Self::Apartment,
            K::Villa => Self::Villa,
            K::Townhouse => Self::Townhouse,
            K::Penthouse => Self::Penthouse,
            K::Office => Self::Office,
            K::Land => Self::Land,
        }
    }
}

impl From<PropertyKind> for domain::listing::PropertyKind {
    fn from(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Apartment => Self::Apartment,
            PropertyKind::Villa => Self::Villa,
            PropertyKind::Townhouse => Self::Townhouse,
            PropertyKind::Penthouse => Self::Penthouse,
            PropertyKind::Office => Self::Office,
            PropertyKind::Land => Self::Land,
        }
    }
}

/// Furnishing of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingFurnishing")]
pub enum Furnishing {
    /// Fully furnished.
    Furnished,

    /// Not furnished.
    Unfurnished,

    /// Partly furnished.
    PartlyFurnished,
}

impl From<domain::listing::Furnishing> for Furnishing {
    fn from(furnishing: domain::listing::Furnishing) -> Self {
        use domain::listing::Furnishing as F;

        match furnishing {
            F::Furnished => Self::Furnished,
            F::Unfurnished => Self::Unfurnished,
            F::PartlyFurnished => Self::PartlyFurnished,
        }
    }
}

impl From<Furnishing> for domain::listing::Furnishing {
    fn from(furnishing: Furnishing) -> Self {
        match furnishing {
            Furnishing::Furnished => Self::Furnished,
            Furnishing::Unfurnished => Self::Unfurnished,
            Furnishing::PartlyFurnished => Self::PartlyFurnished,
        }
    }
}

/// Status of a `Listing`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingStatus")]
pub enum Status {
    /// Available and shown in search results.
    Available,

    /// Sold to a buyer.
    Sold,

    /// Rented out to a tenant.
    Rented,

    /// Withdrawn by the broker.
    Withdrawn,
}

impl From<domain::listing::Status> for Status {
    fn from(status: domain::listing::Status) -> Self {
        use domain::listing::Status as S;

        match status {
            S::Available => Self::Available,
            S::Sold => Self::Sold,
            S::Rented => Self::Rented,
            S::Withdrawn => Self::Withdrawn,
        }
    }
}

impl From<Status> for domain::listing::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::Sold => Self::Sold,
            Status::Rented => Self::Rented,
            Status::Withdrawn => Self::Withdrawn,
        }
    }
}

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Location of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingLocation",
    with = scalar::Via::<domain::listing::Location>,
)]
pub struct Location(domain::listing::Location);

/// Amenity of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingAmenity",
    with = scalar::Via::<domain::listing::Amenity>,
)]
pub struct Amenity(domain::listing::Amenity);

pub mod search {
    //! Definitions related to [`Listing`] search.

    use derive_more::From;
    use juniper::graphql_object;
    use service::read;

    use crate::{AsError, Context, Error};

    use super::Listing;

    /// Page of `Listing` search results.
    #[derive(Clone, Debug, From)]
    pub struct Page(read::listing::search::Page);

    /// Page of `Listing` search results.
    #[graphql_object(name = "ListingSearchPage", context = Context)]
    impl Page {
        /// `Listing`s of this page.
        #[must_use]
        pub fn items(&self) -> Vec<Listing> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total number of `Listing`s matching the selection.
        pub fn total(&self) -> Result<i32, Error> {
            i32::try_from(self.0.total).map_err(AsError::into_error)
        }

        /// Indicator whether more `Listing`s exist beyond this page.
        #[must_use]
        pub fn has_more(&self) -> bool {
            self.0.has_more
        }
    }
}
