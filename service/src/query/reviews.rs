//! [`Query`] collection related to [`Review`]s.

use common::operations::By;

use crate::{domain::broker, read};
#[cfg(doc)]
use crate::{domain::Review, Query};

use super::DatabaseQuery;

/// Queries a page of [`Review`]s of a [`Broker`].
///
/// [`Broker`]: crate::domain::Broker
pub type List =
    DatabaseQuery<By<read::review::list::Page, read::review::list::Selector>>;

/// Queries the aggregated rating of a [`Broker`].
///
/// [`Broker`]: crate::domain::Broker
pub type Summary = DatabaseQuery<By<read::review::Summary, broker::Id>>;
