//! Booking endpoints.
//!
//! ```text
//! POST /book {"retreat_id":2,"user_id":5,"user_name":"Mira","user_email":"mira@example.com",
//!             "user_phone":"555-0100","retreat_title":"Coastal Yoga","retreat_location":"Algarve",
//!             "retreat_price":890,"retreat_duration":7,"payment_details":"card ending 4242"}
//! GET /bookings?user_id=5&page=1&limit=10
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Booking, BookingDraft, BookingFilter, BookingRequest, BookingValidationError, Error, RetreatId,
    RetreatSnapshot, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::{PaginationResponse, page_request};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, QueryPairs, first_value, lenient, parse_json_object, require_f64, require_i32,
    require_str, too_long_error,
};

const RETREAT_ID: FieldName = FieldName::new("retreat_id");
const USER_ID: FieldName = FieldName::new("user_id");
const USER_NAME: FieldName = FieldName::new("user_name");
const USER_EMAIL: FieldName = FieldName::new("user_email");
const USER_PHONE: FieldName = FieldName::new("user_phone");
const RETREAT_TITLE: FieldName = FieldName::new("retreat_title");
const RETREAT_LOCATION: FieldName = FieldName::new("retreat_location");
const RETREAT_PRICE: FieldName = FieldName::new("retreat_price");
const RETREAT_DURATION: FieldName = FieldName::new("retreat_duration");
const PAYMENT_DETAILS: FieldName = FieldName::new("payment_details");

/// A booking as returned by the API, with the retreat snapshot flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 5)]
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    #[schema(example = 2)]
    pub retreat_id: i32,
    pub retreat_title: String,
    pub retreat_location: String,
    pub retreat_price: f64,
    pub retreat_duration: i32,
    pub payment_details: String,
    /// RFC 3339 timestamp assigned when the booking was stored.
    #[schema(example = "2026-10-19T09:30:00+00:00")]
    pub booking_date: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let Booking {
            id,
            user_id,
            user_name,
            user_email,
            user_phone,
            retreat_id,
            retreat,
            payment_details,
            booking_date,
        } = booking;
        Self {
            id,
            user_id: user_id.get(),
            user_name,
            user_email,
            user_phone,
            retreat_id: retreat_id.get(),
            retreat_title: retreat.title,
            retreat_location: retreat.location,
            retreat_price: retreat.price,
            retreat_duration: retreat.duration,
            payment_details,
            booking_date: booking_date.to_rfc3339(),
        }
    }
}

/// Response body for `POST /book`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookingResponse {
    #[schema(example = "Booking created successfully")]
    pub message: String,
    pub booking: BookingResponse,
}

/// Response body for `GET /bookings`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
    pub pagination: PaginationResponse,
}

/// Request body for `POST /book`, for documentation only.
///
/// The retreat fields are required but the stored copy is taken from the
/// retreat record.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreateBookingRequest {
    retreat_id: i32,
    user_id: i32,
    user_name: String,
    user_email: String,
    user_phone: String,
    retreat_title: String,
    retreat_location: String,
    retreat_price: f64,
    retreat_duration: i32,
    payment_details: String,
}

/// Query parameters for `GET /bookings`. When a key repeats, its first
/// value is used.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// 1-based page number.
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<String>,
    /// Page size.
    #[param(value_type = Option<i64>, example = 10)]
    pub limit: Option<String>,
    /// Only bookings made by this user.
    #[param(value_type = Option<i32>, example = 5)]
    pub user_id: Option<String>,
}

impl BookingListQuery {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            page: first_value(pairs, "page"),
            limit: first_value(pairs, "limit"),
            user_id: first_value(pairs, "user_id"),
        }
    }
}

fn map_booking_validation_error(err: BookingValidationError) -> Error {
    match err {
        BookingValidationError::TooLong { field, max } => too_long_error(FieldName::new(field), max),
    }
}

/// Parse and validate a `POST /book` body, reporting the first bad field.
fn parse_booking_request(body: &[u8]) -> Result<BookingRequest, Error> {
    let object = parse_json_object(body)?;
    let retreat_id = require_i32(&object, RETREAT_ID)?;
    let user_id = require_i32(&object, USER_ID)?;
    let user_name = require_str(&object, USER_NAME)?;
    let user_email = require_str(&object, USER_EMAIL)?;
    let user_phone = require_str(&object, USER_PHONE)?;
    let client_snapshot = RetreatSnapshot {
        title: require_str(&object, RETREAT_TITLE)?,
        location: require_str(&object, RETREAT_LOCATION)?,
        price: require_f64(&object, RETREAT_PRICE)?,
        duration: require_i32(&object, RETREAT_DURATION)?,
    };
    let payment_details = require_str(&object, PAYMENT_DETAILS)?;

    BookingRequest::new(BookingDraft {
        retreat_id: RetreatId::new(retreat_id),
        user_id: UserId::new(user_id),
        user_name,
        user_email,
        user_phone,
        client_snapshot,
        payment_details,
    })
    .map_err(map_booking_validation_error)
}

/// Book a retreat for a user.
#[utoipa::path(
    post,
    path = "/book",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = CreateBookingResponse),
        (status = 400, description = "Invalid payload, or the user already booked this retreat (code `conflict`)", body = ErrorSchema),
        (status = 404, description = "Retreat not found", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/book")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = parse_booking_request(&body)?;
    let booking = state.bookings.create_booking(request).await?;

    Ok(HttpResponse::Created().json(CreateBookingResponse {
        message: "Booking created successfully".to_owned(),
        booking: booking.into(),
    }))
}

/// List bookings, optionally for a single user.
#[utoipa::path(
    get,
    path = "/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings", body = BookingListResponse),
        (status = 400, description = "Invalid page size", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    pairs: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<BookingListResponse>> {
    let query = BookingListQuery::from_pairs(&pairs);
    let page = page_request(query.page.as_deref(), query.limit.as_deref())?;
    let filter = lenient(query.user_id.as_deref())
        .map(|id| BookingFilter::for_user(UserId::new(id)))
        .unwrap_or_default();
    let (items, meta) = state
        .bookings_query
        .list_bookings(filter, page)
        .await?
        .into_parts();

    Ok(web::Json(BookingListResponse {
        bookings: items.into_iter().map(BookingResponse::from).collect(),
        pagination: PaginationResponse::from(&meta),
    }))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
