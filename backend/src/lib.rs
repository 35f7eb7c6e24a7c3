//! Wellness retreat backend: retreat catalogue, bookings and their HTTP
//! surface.
//!
//! The crate follows a hexagonal layout. [`domain`] owns entities,
//! validation, ports and services; [`inbound`] adapts HTTP requests onto
//! those ports; [`outbound`] provides the Diesel and in-memory stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
