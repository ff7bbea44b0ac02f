//! GraphQL API definitions.

pub mod agency;
pub mod broker;
pub mod listing;
pub mod message;
mod mutation;
mod query;
pub mod review;
pub mod scalar;
pub mod user;
pub mod verification;

use derive_more::{AsRef, Display, From, Into};
use juniper::{EmptySubscription, GraphQLScalar};
use service::domain;

use crate::{define_error, Context};

pub use self::{
    agency::Agency, broker::Broker, listing::Listing, message::Message,
    mutation::Mutation, query::Query, review::Review, user::User,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// URL of an externally hosted resource, like a photo or a document.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "Url", with = scalar::Via::<domain::Url>)]
pub struct Url(domain::Url);

define_error! {
    enum PrivilegeError {
        #[code = "NOT_BROKER"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must have a `Broker` profile"]
        Broker,

        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `User` must be an administrator"]
        Admin,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        Invalid,
    }
}
