//! [`Query`] collection related to broker verification.

use common::operations::By;

use crate::{domain::broker, read};
#[cfg(doc)]
use crate::{domain::Broker, Query};

use super::DatabaseQuery;

/// Queries the [`read::verification::Status`] of a [`Broker`], with the
/// full request history ordered newest first.
///
/// Resolves to [`None`] if no such [`Broker`] exists.
pub type StatusOf =
    DatabaseQuery<By<Option<read::verification::Status>, broker::Id>>;
