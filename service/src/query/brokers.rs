//! [`Query`] collection related to the multiple [`Broker`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Broker, Query};

use super::DatabaseQuery;

/// Queries a page of the public [`Broker`] directory.
pub type Directory = DatabaseQuery<
    By<read::broker::directory::Page, read::broker::directory::Selector>,
>;
