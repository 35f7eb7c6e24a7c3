//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use crate::domain::ports::{BookingRepository, RetreatRepository};
use crate::domain::{BookingService, RetreatCatalogueService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{DieselBookingRepository, DieselRetreatRepository};

use super::ServerConfig;

/// Build HTTP state over the given repositories.
///
/// One catalogue service answers both retreat ports and one booking service
/// answers both booking ports.
pub fn build_state_from_repositories<R, B>(retreats: Arc<R>, bookings: Arc<B>) -> HttpState
where
    R: RetreatRepository + 'static,
    B: BookingRepository + 'static,
{
    let catalogue = Arc::new(RetreatCatalogueService::new(Arc::clone(&retreats)));
    let booking_service = Arc::new(BookingService::new(retreats, bookings));
    HttpState::new(HttpStatePorts {
        retreats: catalogue.clone(),
        retreats_command: catalogue,
        bookings: booking_service.clone(),
        bookings_query: booking_service,
    })
}

/// Build HTTP state backed by a fresh in-memory store.
pub fn build_in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    build_state_from_repositories(Arc::clone(&store), store)
}

/// Build HTTP state using Diesel repositories when a pool is configured,
/// otherwise falling back to the in-memory store.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_state_from_repositories(
            Arc::new(DieselRetreatRepository::new(pool.clone())),
            Arc::new(DieselBookingRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; retreats and bookings are kept in memory");
            build_in_memory_state()
        }
    };
    web::Data::new(state)
}
