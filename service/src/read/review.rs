//! [`Review`]-related read definitions.

use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::{Broker, Review};

/// Aggregated rating of a [`Broker`].
#[derive(Clone, Copy, Debug)]
pub struct Summary {
    /// Average rating across all [`Review`]s, if any exist.
    pub average: Option<Decimal>,

    /// Total number of [`Review`]s.
    pub count: i64,
}

pub mod list {
    //! [`Review`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::broker;
    #[cfg(doc)]
    use crate::domain::{Broker, Review};

    define_pagination!(Node, Filter);

    /// Node in a [`Review`] list [`Page`].
    pub type Node = crate::domain::Review;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug)]
    pub struct Filter {
        /// ID of the [`Broker`] whose [`Review`]s to list.
        pub broker_id: broker::Id,
    }

    /// Total count of [`Review`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
