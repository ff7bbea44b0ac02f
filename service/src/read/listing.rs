//! [`Listing`]-related read definitions.

use crate::domain::listing;
#[cfg(doc)]
use crate::domain::Listing;

/// Marker for incrementing the view counter of a [`Listing`].
#[derive(Clone, Copy, Debug)]
pub struct View(pub listing::Id);

pub mod search {
    //! [`Listing`] search definitions.

    use common::{define_kind, pagination};
    use derive_more::{From, Into};
    use rust_decimal::Decimal;

    use crate::domain::listing;
    #[cfg(doc)]
    use crate::domain::Listing;

    /// Node in a search [`Page`].
    pub type Node = crate::domain::Listing;

    /// Single page of search results.
    pub type Page = pagination::Page<Node>;

    /// Arguments of the search pagination.
    pub type Arguments = pagination::Arguments;

    /// Selector of a search [`Page`].
    #[derive(Clone, Debug)]
    pub struct Selector {
        /// [`Arguments`] of the pagination.
        pub arguments: Arguments,

        /// [`Filter`] to select [`Listing`]s by.
        pub filter: Filter,

        /// [`SortKey`] to order the results with.
        pub sort: SortKey,
    }

    /// Filter for a search [`Selector`].
    ///
    /// All present constraints are combined with `AND`, an absent one
    /// imposes no constraint.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`listing::Kind`] of the deal.
        pub kind: Option<listing::Kind>,

        /// [`listing::PropertyKind`] of the property.
        pub property_kind: Option<listing::PropertyKind>,

        /// [`listing::Location`] (or its part) to search for,
        /// case-insensitively.
        pub location: Option<listing::Location>,

        /// Exact number of bedrooms, where `0` denotes a studio.
        pub bedrooms: Option<listing::Bedrooms>,

        /// [`listing::Furnishing`] of the property.
        pub furnishing: Option<listing::Furnishing>,

        /// Inclusive lower bound of the derived numeric price.
        pub min_price: Option<Decimal>,

        /// Inclusive upper bound of the derived numeric price.
        pub max_price: Option<Decimal>,
    }

    define_kind! {
        #[doc = "Sort key of a [`Listing`] search.\n\n\
                 Every key breaks ties by creation time descending and then \
                 by ID ascending, so repeated calls with the same arguments \
                 paginate stably."]
        enum SortKey {
            #[doc = "Newest [`Listing`]s first."]
            Newest = 1,

            #[doc = "Cheapest [`Listing`]s first."]
            PriceAsc = 2,

            #[doc = "Most expensive [`Listing`]s first."]
            PriceDesc = 3,

            #[doc = "Most viewed [`Listing`]s first."]
            Popular = 4,

            #[doc = "Largest [`Listing`]s first."]
            AreaDesc = 5,
        }
    }

    /// Total count of [`Listing`]s matching a [`Filter`], regardless of
    /// the pagination applied.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);

    #[cfg(test)]
    mod spec {
        use super::SortKey;

        #[test]
        fn parses_known_sort_keys() {
            assert_eq!("NEWEST".parse(), Ok(SortKey::Newest));
            assert_eq!("PRICE_ASC".parse(), Ok(SortKey::PriceAsc));
            assert_eq!("PRICE_DESC".parse(), Ok(SortKey::PriceDesc));
            assert_eq!("POPULAR".parse(), Ok(SortKey::Popular));
            assert_eq!("AREA_DESC".parse(), Ok(SortKey::AreaDesc));
        }

        #[test]
        fn parses_sort_keys_case_insensitively() {
            assert_eq!("newest".parse(), Ok(SortKey::Newest));
            assert_eq!("price_asc".parse(), Ok(SortKey::PriceAsc));
            assert_eq!("Area_Desc".parse(), Ok(SortKey::AreaDesc));
        }

        #[test]
        fn unknown_sort_key_is_dropped() {
            assert_eq!("CHEAPEST".parse::<SortKey>().ok(), None);
            assert_eq!("PRICE".parse::<SortKey>().ok(), None);
        }
    }
}
