//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Listing, Query};

use super::DatabaseQuery;

/// Queries a page of [`Listing`] search results.
pub type Search = DatabaseQuery<
    By<read::listing::search::Page, read::listing::search::Selector>,
>;
