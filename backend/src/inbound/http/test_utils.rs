//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{BookingService, RetreatCatalogueService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Build handler state backed by a fresh in-memory store.
pub fn in_memory_state() -> (web::Data<HttpState>, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let catalogue = Arc::new(RetreatCatalogueService::new(Arc::clone(&store)));
    let bookings = Arc::new(BookingService::new(Arc::clone(&store), Arc::clone(&store)));
    let state = HttpState::new(HttpStatePorts {
        retreats: catalogue.clone(),
        retreats_command: catalogue,
        bookings: bookings.clone(),
        bookings_query: bookings,
    });
    (web::Data::new(state), store)
}
