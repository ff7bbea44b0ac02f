//! [`Query`] collection related to a single [`Broker`].

use common::operations::By;

use crate::domain::{broker, user, Broker};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Broker`] by its [`broker::Id`].
pub type ById = DatabaseQuery<By<Option<Broker>, broker::Id>>;

/// Queries a [`Broker`] by the [`user::Id`] of its owning [`User`].
///
/// [`User`]: crate::domain::User
pub type ByUserId = DatabaseQuery<By<Option<Broker>, user::Id>>;
