//! Domain entities, validation rules, ports and services.
//!
//! Purpose: hold the retreat and booking model independent of HTTP and
//! storage. Inbound adapters call the driving ports; outbound adapters
//! implement the driven ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Retreat, NewRetreat: stored catalogue entries and their validated inputs.
//! - Booking, BookingRequest, NewBooking: reservations and their inputs.
//! - RetreatFilter, BookingFilter: storage-neutral listing criteria.
//! - RetreatCatalogueService, BookingService: driving-port implementations.

pub mod booking;
mod booking_service;
pub mod error;
pub mod ports;
pub mod retreat;
mod retreat_catalogue_service;
pub mod retreat_filter;
pub mod trace_id;

pub use self::booking::{
    Booking, BookingDraft, BookingRequest, BookingValidationError, NewBooking, RetreatSnapshot,
    UserId,
};
pub use self::booking_service::{
    ALREADY_BOOKED, BookingService, CREATE_BOOKING_FAILED, LIST_BOOKINGS_FAILED, RETREAT_NOT_FOUND,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::retreat::{NewRetreat, Retreat, RetreatDraft, RetreatId, RetreatValidationError};
pub use self::retreat_catalogue_service::{
    CREATE_RETREAT_FAILED, LIST_RETREATS_FAILED, RetreatCatalogueService,
};
pub use self::retreat_filter::{BookingFilter, RetreatFilter};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use retreat_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Retreat not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
