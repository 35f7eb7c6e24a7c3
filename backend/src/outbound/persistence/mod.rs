//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the schema (`schema.rs`) stay private
//! to this module, connections come from a `bb8` pool through
//! `diesel-async`, and every database error is mapped to the owning port's
//! error enum.
//!
//! # Example
//!
//! ```ignore
//! use retreat_backend::outbound::persistence::{DbPool, DieselRetreatRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/retreats")).await?;
//! let retreats = DieselRetreatRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_booking_repository;
mod diesel_retreat_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_retreat_repository::DieselRetreatRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
