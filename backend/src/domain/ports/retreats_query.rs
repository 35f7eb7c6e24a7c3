//! Driving port for retreat listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Retreat, RetreatFilter};

/// Use-case port behind `GET /retreats`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RetreatsQuery: Send + Sync {
    /// Search, filter and paginate retreats.
    async fn list_retreats(
        &self,
        filter: &RetreatFilter,
        page: PageRequest,
    ) -> Result<Page<Retreat>, Error>;
}
