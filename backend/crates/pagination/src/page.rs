//! Page envelopes and the metadata derived from them.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Number of records matching the query across all pages.
    pub total: u64,
    /// Number of pages needed to hold `total` records.
    pub pages: u64,
    /// The 1-based page number that was served.
    pub page: u64,
    /// The page size that was applied.
    pub per_page: u64,
    /// The following page number, when one exists.
    pub next: Option<u64>,
    /// The preceding page number, when one exists.
    pub prev: Option<u64>,
}

impl PageMeta {
    /// Derive metadata for `request` given the total match count.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageMeta, PageRequest};
    ///
    /// let meta = PageMeta::new(25, PageRequest::new(1, 10).expect("valid request"));
    /// assert_eq!(meta.pages, 3);
    /// assert_eq!(meta.next, Some(2));
    /// assert_eq!(meta.prev, None);
    /// ```
    #[must_use]
    pub fn new(total: u64, request: PageRequest) -> Self {
        let page = request.page();
        let per_page = request.per_page();
        let pages = total.div_ceil(per_page);
        Self {
            total,
            pages,
            page,
            per_page,
            next: (page < pages).then(|| page.saturating_add(1)),
            prev: (page > 1).then(|| page.saturating_sub(1)),
        }
    }
}

/// One page of items plus its [`PageMeta`].
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Wrap an already-sliced set of items with the total match count.
    ///
    /// Storage adapters that push `LIMIT`/`OFFSET` down to the database use
    /// this constructor.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            meta: PageMeta::new(total, request),
        }
    }

    /// Slice the full ordered result set in memory.
    #[must_use]
    pub fn from_items(all: Vec<T>, request: PageRequest) -> Self {
        let total = u64::try_from(all.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(skip).take(take).collect();
        Self::new(items, total, request)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Metadata describing this page.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Transform every item while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Split the page into its items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.items, self.meta)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for page slicing and metadata.

    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn twenty_five() -> Vec<u32> {
        (1..=25).collect()
    }

    #[rstest]
    #[case(1, 10)]
    #[case(2, 10)]
    #[case(3, 5)]
    #[case(4, 0)]
    #[case(40, 0)]
    fn slices_twenty_five_items_by_ten(
        twenty_five: Vec<u32>,
        #[case] page: i64,
        #[case] expected_len: usize,
    ) {
        let request = PageRequest::new(page, 10).expect("valid request");
        let page = Page::from_items(twenty_five, request);

        assert_eq!(page.items().len(), expected_len);
        assert_eq!(page.meta().total, 25);
        assert_eq!(page.meta().pages, 3);
    }

    #[rstest]
    fn third_page_holds_the_tail(twenty_five: Vec<u32>) {
        let page = Page::from_items(twenty_five, PageRequest::new(3, 10).expect("valid request"));
        assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(1, 1, 1)]
    fn pages_round_up(#[case] total: u64, #[case] per_page: i64, #[case] pages: u64) {
        let meta = PageMeta::new(total, PageRequest::new(1, per_page).expect("valid request"));
        assert_eq!(meta.pages, pages);
    }

    #[rstest]
    fn beyond_last_page_keeps_prev_and_drops_next() {
        let meta = PageMeta::new(25, PageRequest::new(4, 10).expect("valid request"));
        assert_eq!(meta.next, None);
        assert_eq!(meta.prev, Some(3));
    }

    #[rstest]
    fn empty_result_has_no_neighbours() {
        let page: Page<u32> = Page::from_items(Vec::new(), PageRequest::default());
        assert!(page.items().is_empty());
        assert_eq!(page.meta().pages, 0);
        assert_eq!(page.meta().next, None);
        assert_eq!(page.meta().prev, None);
    }

    #[rstest]
    fn map_preserves_metadata(twenty_five: Vec<u32>) {
        let page = Page::from_items(twenty_five, PageRequest::new(2, 10).expect("valid request"));
        let meta = *page.meta();
        let mapped = page.map(|value| value.to_string());

        assert_eq!(mapped.meta(), &meta);
        assert_eq!(mapped.items().first().map(String::as_str), Some("11"));
    }

    #[rstest]
    fn meta_serialises_with_snake_case_fields() {
        let meta = PageMeta::new(25, PageRequest::new(2, 10).expect("valid request"));
        let value = serde_json::to_value(meta).expect("serialisable meta");
        assert_eq!(
            value,
            json!({
                "total": 25,
                "pages": 3,
                "page": 2,
                "per_page": 10,
                "next": 3,
                "prev": 1,
            })
        );
    }
}
