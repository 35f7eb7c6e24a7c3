//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookingsCommand, BookingsQuery, RetreatsCommand, RetreatsQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub retreats: Arc<dyn RetreatsQuery>,
    pub retreats_command: Arc<dyn RetreatsCommand>,
    pub bookings: Arc<dyn BookingsCommand>,
    pub bookings_query: Arc<dyn BookingsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub retreats: Arc<dyn RetreatsQuery>,
    pub retreats_command: Arc<dyn RetreatsCommand>,
    pub bookings: Arc<dyn BookingsCommand>,
    pub bookings_query: Arc<dyn BookingsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use retreat_backend::domain::{BookingService, RetreatCatalogueService};
    /// use retreat_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use retreat_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let catalogue = Arc::new(RetreatCatalogueService::new(store.clone()));
    /// let bookings = Arc::new(BookingService::new(store.clone(), store));
    /// let state = HttpState::new(HttpStatePorts {
    ///     retreats: catalogue.clone(),
    ///     retreats_command: catalogue,
    ///     bookings: bookings.clone(),
    ///     bookings_query: bookings,
    /// });
    /// let _retreats = state.retreats.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            retreats,
            retreats_command,
            bookings,
            bookings_query,
        } = ports;
        Self {
            retreats,
            retreats_command,
            bookings,
            bookings_query,
        }
    }
}
