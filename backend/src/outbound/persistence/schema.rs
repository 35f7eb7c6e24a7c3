//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Bookable retreat offerings.
    retreats (id) {
        /// Primary key: serial integer.
        id -> Int4,
        #[max_length = 100]
        title -> Varchar,
        description -> Text,
        #[max_length = 100]
        location -> Varchar,
        price -> Float8,
        /// Length of the retreat in days.
        duration -> Int4,
        capacity -> Int4,
    }
}

diesel::table! {
    /// User reservations with a copy of the retreat taken at booking time.
    ///
    /// `(user_id, retreat_id)` carries the `bookings_user_retreat_unique`
    /// constraint.
    bookings (id) {
        id -> Int4,
        user_id -> Int4,
        #[max_length = 100]
        user_name -> Varchar,
        #[max_length = 100]
        user_email -> Varchar,
        #[max_length = 20]
        user_phone -> Varchar,
        retreat_id -> Int4,
        #[max_length = 100]
        retreat_title -> Varchar,
        #[max_length = 100]
        retreat_location -> Varchar,
        retreat_price -> Float8,
        retreat_duration -> Int4,
        #[max_length = 200]
        payment_details -> Varchar,
        /// Assigned by the database on insert.
        booking_date -> Timestamptz,
    }
}

diesel::joinable!(bookings -> retreats (retreat_id));

diesel::allow_tables_to_appear_in_same_query!(bookings, retreats);
