//! [`Review`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use rust_decimal::prelude::ToPrimitive as _;
use service::{domain, read};
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A `Review` left by a customer for a `Broker`.
#[derive(Clone, Debug, From)]
pub struct Review(domain::Review);

/// A `Review` left by a customer for a `Broker`.
#[graphql_object(context = Context)]
impl Review {
    /// Unique identifier of this `Review`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Broker` this `Review` is about.
    #[must_use]
    pub fn broker(&self) -> api::Broker {
        #[expect(
            unsafe_code,
            reason = "`Review` loaded from repository guarantees `Broker` \
                      existence"
        )]
        unsafe {
            api::Broker::new_unchecked(self.0.broker_id)
        }
    }

    /// `User` who authored this `Review`.
    #[must_use]
    pub fn author(&self) -> api::User {
        #[expect(
            unsafe_code,
            reason = "`Review` loaded from repository guarantees `User` \
                      existence"
        )]
        unsafe {
            api::User::new_unchecked(self.0.author_id)
        }
    }

    /// Rating of this `Review`, from 1 to 5.
    #[must_use]
    pub fn rating(&self) -> i32 {
        i32::from(self.0.rating.u8())
    }

    /// Free-form comment of this `Review`.
    #[must_use]
    pub fn comment(&self) -> Option<Comment> {
        self.0.comment.clone().map(Into::into)
    }

    /// `DateTime` when this `Review` was left.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Aggregated rating of a `Broker`.
#[derive(Clone, Copy, Debug, From)]
pub struct Summary(read::review::Summary);

/// Aggregated rating of a `Broker`.
#[graphql_object(name = "ReviewSummary", context = Context)]
impl Summary {
    /// Average rating across all the `Review`s, if any exist.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        self.0.average.and_then(|avg| avg.to_f64())
    }

    /// Total number of `Review`s.
    pub fn count(&self) -> Result<i32, Error> {
        i32::try_from(self.0.count).map_err(AsError::into_error)
    }
}

/// Unique identifier of a `Review`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::review::Id)]
#[into(domain::review::Id)]
#[graphql(name = "ReviewId", transparent)]
pub struct Id(Uuid);

/// Free-form comment of a `Review`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ReviewComment",
    with = scalar::Via::<domain::review::Comment>,
)]
pub struct Comment(domain::review::Comment);

pub mod list {
    //! Definitions related to [`Review`] lists.

    use derive_more::From;
    use juniper::graphql_object;
    use service::{query, read, Query as _};

    use crate::{api, AsError, Context, Error};

    use super::Review;

    /// Default number of [`Review`]s per [`Page`].
    const DEFAULT_LIMIT: i32 = 20;

    /// Page of `Review`s of a `Broker`.
    #[derive(Clone, Debug, From)]
    pub struct Page(read::review::list::Page);

    /// Page of `Review`s of a `Broker`.
    #[graphql_object(name = "ReviewListPage", context = Context)]
    impl Page {
        /// `Review`s of this page, newest first.
        #[must_use]
        pub fn items(&self) -> Vec<Review> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// Total number of `Review`s matching the selection.
        pub fn total(&self) -> Result<i32, Error> {
            i32::try_from(self.0.total).map_err(AsError::into_error)
        }

        /// Indicator whether more `Review`s exist beyond this page.
        #[must_use]
        pub fn has_more(&self) -> bool {
            self.0.has_more
        }
    }

    /// Selects the [`Page`] of `Review`s of the specified `Broker`.
    pub(crate) async fn select(
        ctx: &Context,
        broker_id: api::broker::Id,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Page, Error> {
        let arguments =
            read::review::list::Arguments::new(limit, offset, DEFAULT_LIMIT)
                .ok_or(api::PaginationError::Invalid)?;
        ctx.service()
            .execute(query::reviews::List::by(read::review::list::Selector {
                arguments,
                filter: read::review::list::Filter {
                    broker_id: broker_id.into(),
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
