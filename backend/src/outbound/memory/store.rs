//! Process-local store implementing both repository ports.
//!
//! Retreats and bookings share one mutex so the booking uniqueness check,
//! the retreat reference check and the insert happen atomically, matching
//! the guarantees of the PostgreSQL constraints. Records are kept in
//! `BTreeMap`s keyed by identifier, which gives ascending-id iteration.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, RetreatRepository, RetreatRepositoryError,
};
use crate::domain::{
    Booking, BookingFilter, NewBooking, NewRetreat, Retreat, RetreatFilter, RetreatId,
};

const POISONED: &str = "in-memory store lock poisoned";
const EXHAUSTED: &str = "identifier sequence exhausted";

#[derive(Debug, Default)]
struct State {
    retreats: BTreeMap<i32, Retreat>,
    bookings: BTreeMap<i32, Booking>,
    last_retreat_id: i32,
    last_booking_id: i32,
}

/// Retreat and booking storage held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }
}

fn next_id(last: &mut i32) -> Option<i32> {
    *last = last.checked_add(1)?;
    Some(*last)
}

#[async_trait]
impl RetreatRepository for InMemoryStore {
    async fn insert(&self, retreat: &NewRetreat) -> Result<Retreat, RetreatRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| RetreatRepositoryError::connection(POISONED))?;
        let id = next_id(&mut state.last_retreat_id)
            .ok_or_else(|| RetreatRepositoryError::query(EXHAUSTED))?;
        let stored = retreat.clone().into_retreat(RetreatId::new(id));
        state.retreats.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: RetreatId) -> Result<Option<Retreat>, RetreatRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| RetreatRepositoryError::connection(POISONED))?;
        Ok(state.retreats.get(&id.get()).cloned())
    }

    async fn search(
        &self,
        filter: &RetreatFilter,
        page: PageRequest,
    ) -> Result<Page<Retreat>, RetreatRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| RetreatRepositoryError::connection(POISONED))?;
        let matching = state
            .retreats
            .values()
            .filter(|retreat| filter.matches(retreat))
            .cloned()
            .collect();
        Ok(Page::from_items(matching, page))
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(&self, booking: &NewBooking) -> Result<Booking, BookingRepositoryError> {
        let mut state = self
            .lock()
            .ok_or_else(|| BookingRepositoryError::connection(POISONED))?;
        let user_id = booking.user_id.get();
        let retreat_id = booking.retreat_id.get();

        if !state.retreats.contains_key(&retreat_id) {
            return Err(BookingRepositoryError::unknown_retreat(retreat_id));
        }
        if state
            .bookings
            .values()
            .any(|existing| existing.user_id == booking.user_id && existing.retreat_id == booking.retreat_id)
        {
            return Err(BookingRepositoryError::duplicate(user_id, retreat_id));
        }

        let id = next_id(&mut state.last_booking_id)
            .ok_or_else(|| BookingRepositoryError::query(EXHAUSTED))?;
        let stored = booking.clone().into_booking(id, Utc::now());
        state.bookings.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list(
        &self,
        filter: BookingFilter,
        page: PageRequest,
    ) -> Result<Page<Booking>, BookingRepositoryError> {
        let state = self
            .lock()
            .ok_or_else(|| BookingRepositoryError::connection(POISONED))?;
        let matching = state
            .bookings
            .values()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect();
        Ok(Page::from_items(matching, page))
    }
}
