//! Booking records, booking requests and retreat snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::retreat::{LOCATION_MAX, TITLE_MAX};
use super::{Retreat, RetreatId};

/// Maximum length of a booking user's name, in characters.
pub const USER_NAME_MAX: usize = 100;
/// Maximum length of a booking user's email, in characters.
pub const USER_EMAIL_MAX: usize = 100;
/// Maximum length of a booking user's phone number, in characters.
pub const USER_PHONE_MAX: usize = 20;
/// Maximum length of the opaque payment details, in characters.
pub const PAYMENT_DETAILS_MAX: usize = 200;

/// Client-supplied user identifier. No user entity is owned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Denormalized copy of a retreat taken at booking time.
///
/// Bookings keep this copy even if the retreat later changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetreatSnapshot {
    pub title: String,
    pub location: String,
    pub price: f64,
    pub duration: i32,
}

impl RetreatSnapshot {
    /// Capture the current state of `retreat`.
    #[must_use]
    pub fn of(retreat: &Retreat) -> Self {
        Self {
            title: retreat.title.clone(),
            location: retreat.location.clone(),
            price: retreat.price,
            duration: retreat.duration,
        }
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub retreat_id: RetreatId,
    pub retreat: RetreatSnapshot,
    pub payment_details: String,
    pub booking_date: DateTime<Utc>,
}

/// Validation failures for [`BookingRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// A text field exceeds its column size.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl BookingValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TooLong { field, .. } => field,
        }
    }
}

/// Unvalidated booking fields collected from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub retreat_id: RetreatId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub client_snapshot: RetreatSnapshot,
    pub payment_details: String,
}

/// A validated request to book a retreat.
///
/// The request still carries the snapshot the client sent; the booking
/// service replaces it with one taken from the stored retreat.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    draft: BookingDraft,
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), BookingValidationError> {
    if value.chars().count() > max {
        return Err(BookingValidationError::TooLong { field, max });
    }
    Ok(())
}

impl BookingRequest {
    /// Validate a draft.
    ///
    /// # Errors
    ///
    /// Returns [`BookingValidationError::TooLong`] naming the first field
    /// that exceeds its limit.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingValidationError> {
        check_len("user_name", &draft.user_name, USER_NAME_MAX)?;
        check_len("user_email", &draft.user_email, USER_EMAIL_MAX)?;
        check_len("user_phone", &draft.user_phone, USER_PHONE_MAX)?;
        check_len("retreat_title", &draft.client_snapshot.title, TITLE_MAX)?;
        check_len("retreat_location", &draft.client_snapshot.location, LOCATION_MAX)?;
        check_len("payment_details", &draft.payment_details, PAYMENT_DETAILS_MAX)?;
        Ok(Self { draft })
    }

    pub fn retreat_id(&self) -> RetreatId {
        self.draft.retreat_id
    }

    pub fn user_id(&self) -> UserId {
        self.draft.user_id
    }

    /// Snapshot fields as sent by the client.
    pub fn client_snapshot(&self) -> &RetreatSnapshot {
        &self.draft.client_snapshot
    }

    /// Combine the request with the server-side snapshot for persistence.
    #[must_use]
    pub fn into_new_booking(self, snapshot: RetreatSnapshot) -> NewBooking {
        let BookingDraft {
            retreat_id,
            user_id,
            user_name,
            user_email,
            user_phone,
            client_snapshot: _,
            payment_details,
        } = self.draft;
        NewBooking {
            user_id,
            user_name,
            user_email,
            user_phone,
            retreat_id,
            retreat: snapshot,
            payment_details,
        }
    }
}

/// A booking ready for insertion; the store assigns `id` and `booking_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub retreat_id: RetreatId,
    pub retreat: RetreatSnapshot,
    pub payment_details: String,
}

impl NewBooking {
    /// Attach the store-assigned identifier and timestamp.
    #[must_use]
    pub fn into_booking(self, id: i32, booking_date: DateTime<Utc>) -> Booking {
        Booking {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            user_phone: self.user_phone,
            retreat_id: self.retreat_id,
            retreat: self.retreat,
            payment_details: self.payment_details,
            booking_date,
        }
    }
}
