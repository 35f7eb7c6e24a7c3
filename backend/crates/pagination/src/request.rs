//! Validated page requests.

use thiserror::Error;

/// Page number used when the client omits `page`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client omits `limit`.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The requested page size was zero or negative.
    #[error("per_page must be a positive integer, got {per_page}")]
    NonPositivePerPage {
        /// The rejected page size.
        per_page: i64,
    },
}

/// A 1-based page number paired with a positive page size.
///
/// ## Invariants
/// - `page >= 1`; lower values are clamped to the first page.
/// - `per_page >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Build a request from raw client values.
    ///
    /// Page numbers below one select the first page. Page numbers beyond the
    /// last page are accepted and yield empty slices.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::NonPositivePerPage`] when `per_page` is
    /// zero or negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// let request = PageRequest::new(0, 5).expect("valid request");
    /// assert_eq!(request.page(), 1);
    ///
    /// assert_eq!(
    ///     PageRequest::new(1, 0),
    ///     Err(PageRequestError::NonPositivePerPage { per_page: 0 })
    /// );
    /// ```
    pub fn new(page: i64, per_page: i64) -> Result<Self, PageRequestError> {
        let per_page = u64::try_from(per_page)
            .ok()
            .filter(|value| *value > 0)
            .ok_or(PageRequestError::NonPositivePerPage { per_page })?;
        let page = u64::try_from(page).unwrap_or(1).max(1);
        Ok(Self { page, per_page })
    }

    /// Build a request from optional raw values, applying the defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`PageRequestError`] from [`PageRequest::new`].
    pub fn from_optional(page: Option<i64>, per_page: Option<i64>) -> Result<Self, PageRequestError> {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of records to skip before the requested page begins.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Maximum number of records on the requested page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}
