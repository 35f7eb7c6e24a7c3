//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are what inbound adapters call;
//! driven ports (`*Repository`) are what the domain services call and the
//! outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_repository;
mod bookings_command;
mod bookings_query;
mod retreat_repository;
mod retreats_command;
mod retreats_query;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use bookings_command::MockBookingsCommand;
pub use bookings_command::BookingsCommand;
#[cfg(test)]
pub use bookings_query::MockBookingsQuery;
pub use bookings_query::BookingsQuery;
#[cfg(test)]
pub use retreat_repository::MockRetreatRepository;
pub use retreat_repository::{RetreatRepository, RetreatRepositoryError};
#[cfg(test)]
pub use retreats_command::MockRetreatsCommand;
pub use retreats_command::RetreatsCommand;
#[cfg(test)]
pub use retreats_query::MockRetreatsQuery;
pub use retreats_query::RetreatsQuery;
