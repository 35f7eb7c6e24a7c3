//! Driving port for booking creation.

use async_trait::async_trait;

use crate::domain::{Booking, BookingRequest, Error};

/// Use-case port behind `POST /book`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingsCommand: Send + Sync {
    /// Book a retreat for a user.
    ///
    /// Fails with `not_found` when the retreat is unknown and with
    /// `conflict` when the user already booked it, in that order.
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error>;
}
