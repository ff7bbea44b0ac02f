//! [`Broker`]-related read definitions.

#[cfg(doc)]
use crate::domain::Broker;

pub mod directory {
    //! Public directory of verified [`Broker`]s.
    //!
    //! Only [`verification::Status::Verified`] [`Broker`]s appear here,
    //! ordered by profile completeness.
    //!
    //! [`verification::Status::Verified`]:
    //!     crate::domain::verification::Status::Verified

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::broker;
    #[cfg(doc)]
    use crate::domain::{verification, Broker};

    define_pagination!(Node, Filter);

    /// Node in a directory [`Page`].
    pub type Node = crate::domain::Broker;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`broker::Name`] (or its part) to search for.
        pub name: Option<broker::Name>,
    }

    /// Total count of [`Broker`]s in the directory.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
