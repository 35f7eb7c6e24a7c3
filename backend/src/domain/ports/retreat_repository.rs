//! Driven port for retreat persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewRetreat, Retreat, RetreatFilter, RetreatId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by retreat repositories.
    pub enum RetreatRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "retreat store connection failed: {message}",
        /// A statement failed or returned malformed data.
        Query { message: String } =>
            "retreat store query failed: {message}",
    }
}

/// Storage for retreat records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RetreatRepository: Send + Sync {
    /// Persist a new retreat and return it with its assigned identifier.
    async fn insert(&self, retreat: &NewRetreat) -> Result<Retreat, RetreatRepositoryError>;

    /// Fetch one retreat by identifier.
    async fn find_by_id(&self, id: RetreatId) -> Result<Option<Retreat>, RetreatRepositoryError>;

    /// Return the requested page of retreats matching `filter`, ordered by
    /// ascending identifier.
    async fn search(
        &self,
        filter: &RetreatFilter,
        page: PageRequest,
    ) -> Result<Page<Retreat>, RetreatRepositoryError>;
}
