//! Retreat catalogue domain service.
//!
//! Implements the listing and creation driving ports over a
//! [`RetreatRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::Value;
use tracing::{error, info};

use crate::domain::ports::{
    RetreatRepository, RetreatRepositoryError, RetreatsCommand, RetreatsQuery,
};
use crate::domain::{Error, NewRetreat, Retreat, RetreatFilter};

/// Message returned when the store rejects a new retreat.
pub const CREATE_RETREAT_FAILED: &str = "An error occurred while creating the retreat";
/// Message returned when the store fails a listing.
pub const LIST_RETREATS_FAILED: &str = "An error occurred while listing retreats";

/// Retreat service implementing [`RetreatsQuery`] and [`RetreatsCommand`].
#[derive(Clone)]
pub struct RetreatCatalogueService<R> {
    retreats: Arc<R>,
}

impl<R> RetreatCatalogueService<R> {
    /// Create a new service backed by `retreats`.
    pub fn new(retreats: Arc<R>) -> Self {
        Self { retreats }
    }
}

fn store_failure(message: &'static str, err: &RetreatRepositoryError) -> Error {
    error!(error = %err, "{message}");
    Error::internal(message).with_details(Value::String(err.to_string()))
}

#[async_trait]
impl<R> RetreatsQuery for RetreatCatalogueService<R>
where
    R: RetreatRepository,
{
    async fn list_retreats(
        &self,
        filter: &RetreatFilter,
        page: PageRequest,
    ) -> Result<Page<Retreat>, Error> {
        self.retreats
            .search(filter, page)
            .await
            .map_err(|err| store_failure(LIST_RETREATS_FAILED, &err))
    }
}

#[async_trait]
impl<R> RetreatsCommand for RetreatCatalogueService<R>
where
    R: RetreatRepository,
{
    async fn create_retreat(&self, retreat: NewRetreat) -> Result<Retreat, Error> {
        let created = self
            .retreats
            .insert(&retreat)
            .await
            .map_err(|err| store_failure(CREATE_RETREAT_FAILED, &err))?;
        info!(retreat_id = %created.id, "retreat created");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "retreat_catalogue_service_tests.rs"]
mod tests;
