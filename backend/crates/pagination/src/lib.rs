//! Offset pagination primitives shared by retreat backend endpoints.
//!
//! A [`PageRequest`] captures the 1-based page number and page size taken
//! from query parameters. Adapters use [`PageRequest::offset`] and
//! [`PageRequest::limit`] to slice a result set, then wrap the slice and the
//! total match count in a [`Page`], which derives the [`PageMeta`] envelope
//! (`total`, `pages`, `next`, `prev`) returned to clients.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(3, 10).expect("valid request");
//! let page = Page::from_items((1..=25).collect::<Vec<u32>>(), request);
//!
//! assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
//! assert_eq!(page.meta().pages, 3);
//! assert_eq!(page.meta().prev, Some(2));
//! assert_eq!(page.meta().next, None);
//! ```

mod page;
mod request;

pub use page::{Page, PageMeta};
pub use request::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PageRequest, PageRequestError};
