//! Driving port for booking listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Booking, BookingFilter, Error};

/// Use-case port behind `GET /bookings`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingsQuery: Send + Sync {
    /// List bookings, optionally for one user.
    async fn list_bookings(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Page<Booking>, Error>;
}
