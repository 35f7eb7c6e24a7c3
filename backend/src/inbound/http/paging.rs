//! Pagination query handling shared by the list endpoints.

use pagination::{PageMeta, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::validation::{FieldName, invalid_value_error, lenient};

const LIMIT: FieldName = FieldName::new("limit");

/// Pagination metadata returned beside every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationResponse {
    /// Records matching the query across all pages.
    #[schema(example = 25)]
    pub total: u64,
    /// Number of pages at the applied page size.
    #[schema(example = 3)]
    pub pages: u64,
    /// Page that was served.
    #[schema(example = 1)]
    pub page: u64,
    /// Page size that was applied.
    #[schema(example = 10)]
    pub per_page: u64,
    /// Following page number, if any.
    #[schema(example = 2)]
    pub next: Option<u64>,
    /// Preceding page number, if any.
    pub prev: Option<u64>,
}

impl From<&PageMeta> for PaginationResponse {
    fn from(meta: &PageMeta) -> Self {
        Self {
            total: meta.total,
            pages: meta.pages,
            page: meta.page,
            per_page: meta.per_page,
            next: meta.next,
            prev: meta.prev,
        }
    }
}

/// Build a page request from raw `page` and `limit` query values.
///
/// Values that are not integers are ignored and fall back to the defaults;
/// a zero or negative `limit` is rejected.
pub(crate) fn page_request(page: Option<&str>, limit: Option<&str>) -> Result<PageRequest, Error> {
    PageRequest::from_optional(lenient(page), lenient(limit)).map_err(|err| match err {
        PageRequestError::NonPositivePerPage { .. } => {
            invalid_value_error(LIMIT, "limit must be a positive integer")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(None, None, 1, 10)]
    #[case::explicit(Some("3"), Some("5"), 3, 5)]
    #[case::garbage_ignored(Some("two"), Some("ten"), 1, 10)]
    #[case::page_clamped(Some("-4"), Some("10"), 1, 10)]
    fn builds_page_requests(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        let request = page_request(page, limit).expect("valid request");
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.per_page(), expected_limit);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    fn rejects_non_positive_limits(#[case] limit: &str) {
        let err = page_request(None, Some(limit)).expect_err("invalid limit");
        assert_eq!(err.message(), "limit must be a positive integer");
    }

    #[rstest]
    fn converts_page_meta() {
        let meta = PageMeta::new(25, PageRequest::new(3, 10).expect("valid request"));
        let dto = PaginationResponse::from(&meta);

        assert_eq!(dto.pages, 3);
        assert_eq!(dto.next, None);
        assert_eq!(dto.prev, Some(2));
    }
}
