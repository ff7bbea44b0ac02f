//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use rust_decimal::Decimal;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Agency` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AGENCY_NOT_EXISTS` - the `Agency` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "agency",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn agency(
        id: api::agency::Id,
        ctx: &Context,
    ) -> Result<api::Agency, Error> {
        ctx.service()
            .execute(query::agency::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| AgencyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all the `Agency`s, ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "agencies",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn agencies(ctx: &Context) -> Result<Vec<api::Agency>, Error> {
        ctx.service()
            .execute(query::agency::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|agencies| agencies.into_iter().map(Into::into).collect())
    }

    /// Returns the `Broker` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BROKER_NOT_EXISTS` - the `Broker` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "broker",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn broker(
        id: api::broker::Id,
        ctx: &Context,
    ) -> Result<api::Broker, Error> {
        ctx.service()
            .execute(query::broker::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| BrokerError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Broker` profile of the currently authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_BROKER` - the current `User` has no `Broker` profile.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myBroker",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_broker(ctx: &Context) -> Result<api::Broker, Error> {
        api::broker::require_own(ctx).await.map(Into::into)
    }

    /// Fetches the page of the public `Broker` directory, verified `Broker`s
    /// only, most complete profiles first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                    invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "brokers",
            limit = ?limit,
            name = ?name.as_ref().map(ToString::to_string),
            offset = ?offset,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn brokers(
        limit: Option<i32>,
        offset: Option<i32>,
        name: Option<api::broker::Name>,
        ctx: &Context,
    ) -> Result<api::broker::directory::Page, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 20;

        let arguments = read::broker::directory::Arguments::new(
            limit,
            offset,
            DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Invalid.into())
        .map_err(ctx.error())?;

        ctx.service()
            .execute(query::brokers::Directory::by(
                read::broker::directory::Selector {
                    arguments,
                    filter: read::broker::directory::Filter {
                        name: name.map(Into::into),
                    },
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Searches `Listing`s, available ones only.
    ///
    /// Filters arrive as loose client input: `kind`, `propertyKind`,
    /// `furnishing` and `sort` values match case-insensitively, an
    /// unrecognized value imposes no constraint rather than erroring, and
    /// `sort` falls back to `NEWEST`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                    invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            bedrooms = ?bedrooms,
            gql.name = "searchListings",
            kind = ?kind,
            limit = ?limit,
            location = ?location,
            offset = ?offset,
            otel.name = Self::SPAN_NAME,
            property_kind = ?property_kind,
            sort = ?sort,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "search surface")]
    pub async fn search_listings(
        limit: Option<i32>,
        offset: Option<i32>,
        kind: Option<String>,
        property_kind: Option<String>,
        location: Option<String>,
        bedrooms: Option<i32>,
        furnishing: Option<String>,
        min_price: Option<f64>,
        max_price: Option<f64>,
        sort: Option<String>,
        ctx: &Context,
    ) -> Result<api::listing::search::Page, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 20;

        let arguments = read::listing::search::Arguments::new(
            limit,
            offset,
            DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Invalid.into())
        .map_err(ctx.error())?;

        let filter = read::listing::search::Filter {
            kind: kind.and_then(|k| k.parse().ok()),
            property_kind: property_kind.and_then(|k| k.parse().ok()),
            location: location.and_then(|l| l.parse().ok()),
            bedrooms: bedrooms
                .and_then(|b| domain::listing::Bedrooms::try_from(b).ok()),
            furnishing: furnishing.and_then(|f| f.parse().ok()),
            min_price: min_price.and_then(|p| Decimal::try_from(p).ok()),
            max_price: max_price.and_then(|p| Decimal::try_from(p).ok()),
        };
        let sort = sort
            .and_then(|s| s.parse().ok())
            .unwrap_or(read::listing::search::SortKey::Newest);

        ctx.service()
            .execute(query::listings::Search::by(
                read::listing::search::Selector {
                    arguments,
                    filter,
                    sort,
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the verification overview of the specified `Broker`.
    ///
    /// Available to the owning `Broker` and to administrators only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the current `User` is neither the owning `Broker` nor
    ///                 an administrator.
    /// - `BROKER_NOT_EXISTS` - the `Broker` with the specified ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            broker_id = %broker_id,
            gql.name = "verificationOverview",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn verification_overview(
        broker_id: api::broker::Id,
        ctx: &Context,
    ) -> Result<api::verification::Overview, Error> {
        let session = ctx.current_session().await?;
        let role = api::user::role_of(ctx, session.user_id).await?;
        if role != api::user::Role::Admin {
            let own = api::broker::require_own(ctx).await?;
            if api::broker::Id::from(own.id) != broker_id {
                return Err(api::PrivilegeError::Admin.into());
            }
        }

        ctx.service()
            .execute(query::verification::StatusOf::by(broker_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| BrokerError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of `Review`s left for the specified `Broker`, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                    invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            broker_id = %broker_id,
            gql.name = "reviews",
            limit = ?limit,
            offset = ?offset,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reviews(
        broker_id: api::broker::Id,
        limit: Option<i32>,
        offset: Option<i32>,
        ctx: &Context,
    ) -> Result<api::review::list::Page, Error> {
        api::review::list::select(ctx, broker_id, limit, offset).await
    }

    /// Returns the aggregated rating of the specified `Broker`.
    #[tracing::instrument(
        skip_all,
        fields(
            broker_id = %broker_id,
            gql.name = "reviewSummary",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn review_summary(
        broker_id: api::broker::Id,
        ctx: &Context,
    ) -> Result<api::review::Summary, Error> {
        ctx.service()
            .execute(query::reviews::Summary::by(broker_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of the conversation between the currently
    /// authenticated `User` and the specified peer, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                    invalid.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "conversation",
            limit = ?limit,
            offset = ?offset,
            otel.name = Self::SPAN_NAME,
            peer_id = %peer_id,
        ),
    )]
    pub async fn conversation(
        peer_id: api::user::Id,
        limit: Option<i32>,
        offset: Option<i32>,
        ctx: &Context,
    ) -> Result<api::message::conversation::Page, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 20;

        let my_id = ctx.current_session().await?.user_id;
        let arguments = read::message::conversation::Arguments::new(
            limit,
            offset,
            DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Invalid.into())
        .map_err(ctx.error())?;

        ctx.service()
            .execute(query::messages::Conversation::by(
                read::message::conversation::Selector {
                    arguments,
                    filter: read::message::conversation::Filter {
                        between: (my_id.into(), peer_id.into()),
                    },
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum AgencyError {
        #[code = "AGENCY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Agency` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum BrokerError {
        #[code = "BROKER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Broker` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
