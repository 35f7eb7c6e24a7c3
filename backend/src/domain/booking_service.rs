//! Booking domain service.
//!
//! A booking is accepted only for an existing retreat, and at most once per
//! user and retreat. The retreat lookup runs first so an unknown retreat is
//! reported as `not_found` even when a duplicate would also apply. The
//! duplicate check itself is left to the repository's conditional insert.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, BookingsCommand, BookingsQuery, RetreatRepository,
    RetreatRepositoryError,
};
use crate::domain::{Booking, BookingFilter, BookingRequest, Error, RetreatSnapshot};

/// Message returned when the retreat being booked does not exist.
pub const RETREAT_NOT_FOUND: &str = "Retreat not found";
/// Message returned when the user already booked the retreat.
pub const ALREADY_BOOKED: &str = "You have already booked this retreat";
/// Message returned when the store fails a booking insert.
pub const CREATE_BOOKING_FAILED: &str = "An error occurred while creating the booking";
/// Message returned when the store fails a booking listing.
pub const LIST_BOOKINGS_FAILED: &str = "An error occurred while listing bookings";

/// Booking service implementing [`BookingsCommand`] and [`BookingsQuery`].
#[derive(Clone)]
pub struct BookingService<R, B> {
    retreats: Arc<R>,
    bookings: Arc<B>,
}

impl<R, B> BookingService<R, B> {
    /// Create a new service with the given repositories.
    pub fn new(retreats: Arc<R>, bookings: Arc<B>) -> Self {
        Self { retreats, bookings }
    }
}

fn retreat_store_failure(err: &RetreatRepositoryError) -> Error {
    error!(error = %err, "retreat lookup failed during booking");
    Error::internal(CREATE_BOOKING_FAILED).with_details(Value::String(err.to_string()))
}

fn map_booking_error(message: &'static str, err: BookingRepositoryError) -> Error {
    match err {
        BookingRepositoryError::Duplicate { .. } => Error::conflict(ALREADY_BOOKED),
        BookingRepositoryError::UnknownRetreat { .. } => Error::not_found(RETREAT_NOT_FOUND),
        other @ (BookingRepositoryError::Connection { .. }
        | BookingRepositoryError::Query { .. }) => {
            error!(error = %other, "{message}");
            Error::internal(message).with_details(Value::String(other.to_string()))
        }
    }
}

#[async_trait]
impl<R, B> BookingsCommand for BookingService<R, B>
where
    R: RetreatRepository,
    B: BookingRepository,
{
    async fn create_booking(&self, request: BookingRequest) -> Result<Booking, Error> {
        let retreat_id = request.retreat_id();
        let retreat = self
            .retreats
            .find_by_id(retreat_id)
            .await
            .map_err(|err| retreat_store_failure(&err))?
            .ok_or_else(|| Error::not_found(RETREAT_NOT_FOUND))?;

        let snapshot = RetreatSnapshot::of(&retreat);
        if request.client_snapshot() != &snapshot {
            warn!(
                retreat_id = %retreat_id,
                user_id = %request.user_id(),
                "client retreat snapshot differs from stored retreat; storing server copy"
            );
        }

        let booking = self
            .bookings
            .insert(&request.into_new_booking(snapshot))
            .await
            .map_err(|err| map_booking_error(CREATE_BOOKING_FAILED, err))?;
        info!(
            booking_id = booking.id,
            retreat_id = %booking.retreat_id,
            user_id = %booking.user_id,
            "booking created"
        );
        Ok(booking)
    }
}

#[async_trait]
impl<R, B> BookingsQuery for BookingService<R, B>
where
    R: RetreatRepository,
    B: BookingRepository,
{
    async fn list_bookings(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Page<Booking>, Error> {
        self.bookings
            .list(filter, page)
            .await
            .map_err(|err| map_booking_error(LIST_BOOKINGS_FAILED, err))
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
