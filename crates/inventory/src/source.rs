//! Boundary to the external inventory store.

use async_trait::async_trait;
use thiserror::Error;

use tiergate_core::ApplianceModelId;

use crate::unit::InventoryUnit;

/// Failure reported by an inventory adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The store could not be reached (connection refused, pool exhausted, ...).
    #[error("inventory store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but the query failed.
    #[error("inventory query failed: {0}")]
    Query(String),
}

/// Read-only query over inventory units.
///
/// Implementations return the units of `model_id` whose install status is
/// [`crate::InstallStatus::IN_STOCK`]. They must not reserve or lock anything.
/// An adapter may cap the result; a non-empty answer is all the gate needs.
#[async_trait]
pub trait InventoryUnitSource: Send + Sync {
    async fn find_in_stock_units(
        &self,
        model_id: &ApplianceModelId,
    ) -> Result<Vec<InventoryUnit>, SourceError>;
}

#[async_trait]
impl<S> InventoryUnitSource for std::sync::Arc<S>
where
    S: InventoryUnitSource + ?Sized,
{
    async fn find_in_stock_units(
        &self,
        model_id: &ApplianceModelId,
    ) -> Result<Vec<InventoryUnit>, SourceError> {
        (**self).find_in_stock_units(model_id).await
    }
}
