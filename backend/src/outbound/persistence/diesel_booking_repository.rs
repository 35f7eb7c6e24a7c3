//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! Inserts use `ON CONFLICT (user_id, retreat_id) DO NOTHING RETURNING *`:
//! an empty result means the pair already exists, which closes the window
//! between checking for a booking and writing one. A foreign key failure
//! means the retreat was deleted after the service looked it up.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingFilter, NewBooking};

use super::diesel_basic_error_mapping::{
    from_sql_count, map_basic_diesel_error, map_basic_pool_error, to_sql_bigint,
};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the `BookingRepository` port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel_error(error: DieselError, operation: &'static str) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        operation,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

/// Map insert failures, recognising the uniqueness and retreat constraints.
fn map_insert_error(error: DieselError, booking: &NewBooking) -> BookingRepositoryError {
    let user_id = booking.user_id.get();
    let retreat_id = booking.retreat_id.get();
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(constraint = info.constraint_name(), "booking uniqueness violated");
            BookingRepositoryError::duplicate(user_id, retreat_id)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            debug!(constraint = info.constraint_name(), "booking retreat reference violated");
            BookingRepositoryError::unknown_retreat(retreat_id)
        }
        other => map_diesel_error(other, "insert booking"),
    }
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookingRow> = diesel::insert_into(bookings::table)
            .values(NewBookingRow::from(booking))
            .on_conflict((bookings::user_id, bookings::retreat_id))
            .do_nothing()
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_insert_error(err, booking))?;

        row.map(Booking::from).ok_or_else(|| {
            BookingRepositoryError::duplicate(booking.user_id.get(), booking.retreat_id.get())
        })
    }

    async fn list(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Page<Booking>, BookingRepositoryError> {
        let mut count_query = bookings::table.select(count_star()).into_boxed();
        let mut page_query = bookings::table.select(BookingRow::as_select()).into_boxed();
        if let Some(user_id) = filter.user_id {
            count_query = count_query.filter(bookings::user_id.eq(user_id.get()));
            page_query = page_query.filter(bookings::user_id.eq(user_id.get()));
        }
        let page_query = page_query
            .order(bookings::id.asc())
            .limit(to_sql_bigint(page.limit()))
            .offset(to_sql_bigint(page.offset()));

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = count_query
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count bookings"))?;
        let rows: Vec<BookingRow> = page_query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load bookings"))?;

        Ok(Page::new(
            rows.into_iter().map(Booking::from).collect(),
            from_sql_count(total),
            page,
        ))
    }
}
