//! Offset pagination definitions.

/// Maximum allowed number of items per page.
pub const MAX_LIMIT: usize = 50;

/// Arguments of an offset pagination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Maximum number of items to return.
    limit: usize,

    /// Number of items to skip.
    offset: usize,
}

impl Arguments {
    /// Creates new [`Arguments`] out of the provided values.
    ///
    /// A missing `limit` falls back to the provided `default_limit`, a
    /// missing `offset` falls back to `0`. The `limit` is clamped to
    /// [`MAX_LIMIT`]. [`None`] is returned if any provided value is
    /// negative.
    pub fn new<Num: TryInto<usize>>(
        limit: Option<Num>,
        offset: Option<Num>,
        default_limit: Num,
    ) -> Option<Self> {
        let limit = limit
            .unwrap_or(default_limit)
            .try_into()
            .ok()?
            .min(MAX_LIMIT);
        let offset = offset.map_or(Some(0), |o| o.try_into().ok())?;
        Some(Self { limit, offset })
    }

    /// Returns the maximum number of items to return.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of items to skip.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Single page of `I` items.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items of this [`Page`].
    pub items: Vec<I>,

    /// Total number of items matching the selection, regardless of the
    /// pagination applied.
    pub total: usize,

    /// Indicator whether more items exist beyond this [`Page`].
    pub has_more: bool,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] out of the selected `items` and the `total`
    /// number of matching items.
    #[must_use]
    pub fn new(args: Arguments, items: Vec<I>, total: usize) -> Self {
        let has_more = args.offset() + items.len() < total;
        Self {
            items,
            total,
            has_more,
        }
    }

    /// Maps the items of this [`Page`] with the provided function.
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            has_more: self.has_more,
        }
    }
}

/// Selector of a [`Page`] with an `F` filter.
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// [`Arguments`] of the pagination.
    pub arguments: Arguments,

    /// Filter to select items by.
    pub filter: F,
}

/// Macro for defining pagination over a node type.
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        /// Single page of selected nodes.
        pub type Page = $crate::pagination::Page<$node>;

        /// Arguments of the pagination.
        pub type Arguments = $crate::pagination::Arguments;

        /// Selector of a [`Page`].
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page, MAX_LIMIT};

    #[test]
    fn clamps_limit() {
        let args = Arguments::new(Some(500), None, 20).unwrap();
        assert_eq!(args.limit(), MAX_LIMIT);
        assert_eq!(args.offset(), 0);
    }

    #[test]
    fn applies_defaults() {
        let args = Arguments::new(None, None, 20).unwrap();
        assert_eq!(args.limit(), 20);
        assert_eq!(args.offset(), 0);
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(Arguments::new(Some(-1), None, 20), None);
        assert_eq!(Arguments::new(None, Some(-5), 20), None);
    }

    #[test]
    fn has_more_when_items_remain() {
        let args = Arguments::new(Some(2), Some(0), 20).unwrap();
        let page = Page::new(args, vec![1, 2], 5);
        assert!(page.has_more);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn no_more_on_last_page() {
        let args = Arguments::new(Some(2), Some(4), 20).unwrap();
        let page = Page::new(args, vec![5], 5);
        assert!(!page.has_more);
    }

    #[test]
    fn no_more_beyond_total() {
        let args = Arguments::new(Some(10), Some(100), 20).unwrap();
        let page = Page::new(args, Vec::<i32>::new(), 5);
        assert!(!page.has_more);
        assert_eq!(page.total, 5);
    }
}
