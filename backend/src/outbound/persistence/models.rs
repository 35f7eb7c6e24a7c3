//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions to and from domain types live
//! here so the repositories stay thin.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Booking, NewBooking, NewRetreat, Retreat, RetreatId, RetreatSnapshot, UserId,
};

use super::schema::{bookings, retreats};

/// Row struct for reading from the retreats table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = retreats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RetreatRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub duration: i32,
    pub capacity: i32,
}

impl From<RetreatRow> for Retreat {
    fn from(row: RetreatRow) -> Self {
        Self {
            id: RetreatId::new(row.id),
            title: row.title,
            description: row.description,
            location: row.location,
            price: row.price,
            duration: row.duration,
            capacity: row.capacity,
        }
    }
}

/// Insertable struct for new retreat records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = retreats)]
pub(crate) struct NewRetreatRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub price: f64,
    pub duration: i32,
    pub capacity: i32,
}

impl<'a> From<&'a NewRetreat> for NewRetreatRow<'a> {
    fn from(retreat: &'a NewRetreat) -> Self {
        Self {
            title: retreat.title(),
            description: retreat.description(),
            location: retreat.location(),
            price: retreat.price(),
            duration: retreat.duration(),
            capacity: retreat.capacity(),
        }
    }
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub retreat_id: i32,
    pub retreat_title: String,
    pub retreat_location: String,
    pub retreat_price: f64,
    pub retreat_duration: i32,
    pub payment_details: String,
    pub booking_date: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::new(row.user_id),
            user_name: row.user_name,
            user_email: row.user_email,
            user_phone: row.user_phone,
            retreat_id: RetreatId::new(row.retreat_id),
            retreat: RetreatSnapshot {
                title: row.retreat_title,
                location: row.retreat_location,
                price: row.retreat_price,
                duration: row.retreat_duration,
            },
            payment_details: row.payment_details,
            booking_date: row.booking_date,
        }
    }
}

/// Insertable struct for new booking records. `booking_date` is left to the
/// column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub user_id: i32,
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub user_phone: &'a str,
    pub retreat_id: i32,
    pub retreat_title: &'a str,
    pub retreat_location: &'a str,
    pub retreat_price: f64,
    pub retreat_duration: i32,
    pub payment_details: &'a str,
}

impl<'a> From<&'a NewBooking> for NewBookingRow<'a> {
    fn from(booking: &'a NewBooking) -> Self {
        Self {
            user_id: booking.user_id.get(),
            user_name: &booking.user_name,
            user_email: &booking.user_email,
            user_phone: &booking.user_phone,
            retreat_id: booking.retreat_id.get(),
            retreat_title: &booking.retreat.title,
            retreat_location: &booking.retreat.location,
            retreat_price: booking.retreat.price,
            retreat_duration: booking.retreat.duration,
            payment_details: &booking.payment_details,
        }
    }
}
