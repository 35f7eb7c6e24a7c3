//! Driving port for retreat creation.

use async_trait::async_trait;

use crate::domain::{Error, NewRetreat, Retreat};

/// Use-case port behind `POST /retreats`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RetreatsCommand: Send + Sync {
    /// Persist a validated retreat.
    async fn create_retreat(&self, retreat: NewRetreat) -> Result<Retreat, Error>;
}
