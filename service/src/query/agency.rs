//! [`Query`] collection related to a single [`Agency`].

use common::operations::By;

use crate::domain::{agency, Agency};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Agency`] by its [`agency::Id`].
pub type ById = DatabaseQuery<By<Option<Agency>, agency::Id>>;

/// Queries all [`Agency`]s, ordered by name.
pub type List = DatabaseQuery<By<Vec<Agency>, ()>>;
