//! Driven port for booking persistence.
//!
//! Implementations must enforce the one-booking-per-user-and-retreat rule
//! atomically with the insert, reporting collisions as
//! [`BookingRepositoryError::Duplicate`] instead of relying on a prior read.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Booking, BookingFilter, NewBooking};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repositories.
    pub enum BookingRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "booking store connection failed: {message}",
        /// A statement failed or returned malformed data.
        Query { message: String } =>
            "booking store query failed: {message}",
        /// The user already holds a booking for the retreat.
        Duplicate { user_id: i32, retreat_id: i32 } =>
            "user {user_id} already booked retreat {retreat_id}",
        /// The referenced retreat vanished before the insert.
        UnknownRetreat { retreat_id: i32 } =>
            "retreat {retreat_id} does not exist",
    }
}

/// Storage for booking records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking unless one already exists for the same user and
    /// retreat.
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError>;

    /// Return the requested page of bookings matching `filter`, ordered by
    /// ascending identifier.
    async fn list(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Page<Booking>, BookingRepositoryError>;
}
