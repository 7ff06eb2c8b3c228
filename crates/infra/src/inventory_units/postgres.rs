//! Postgres-backed inventory unit lookup.
//!
//! Expects the external inventory schema to expose:
//!
//! ```sql
//! appliance_units (
//!     unit_id        TEXT PRIMARY KEY,
//!     model_id       TEXT NOT NULL,
//!     install_status TEXT NOT NULL
//! )
//! ```
//!
//! The adapter only reads. Timeouts and cancellation are enforced by the
//! stock gate around it, not here.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::{debug, warn};

use tiergate_core::ApplianceModelId;
use tiergate_inventory::{InstallStatus, InventoryUnit, InventoryUnitSource, SourceError};

const FIND_IN_STOCK_UNITS: &str = r#"
    SELECT unit_id, model_id, install_status
    FROM appliance_units
    WHERE model_id = $1 AND install_status = $2
    LIMIT 1
"#;

/// Postgres adapter for [`InventoryUnitSource`].
#[derive(Debug, Clone)]
pub struct PostgresInventoryUnits {
    pool: PgPool,
}

impl PostgresInventoryUnits {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily-connecting pool. No connection is opened until the
    /// first lookup, so an unreachable database shows up as a lookup
    /// failure rather than a startup crash.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }
}

fn classify_sqlx_error(err: sqlx::Error) -> SourceError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => SourceError::Unavailable(err.to_string()),
        other => SourceError::Query(other.to_string()),
    }
}

#[async_trait]
impl InventoryUnitSource for PostgresInventoryUnits {
    async fn find_in_stock_units(
        &self,
        model_id: &ApplianceModelId,
    ) -> Result<Vec<InventoryUnit>, SourceError> {
        let rows = sqlx::query(FIND_IN_STOCK_UNITS)
            .bind(model_id.as_str())
            .bind(InstallStatus::IN_STOCK_CODE)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                let err = classify_sqlx_error(err);
                warn!(%model_id, error = %err, "postgres inventory query failed");
                err
            })?;
        debug!(%model_id, rows = rows.len(), "postgres inventory query returned");

        rows.into_iter()
            .map(|row| {
                let unit_id: String = row.try_get("unit_id").map_err(classify_sqlx_error)?;
                let model: String = row.try_get("model_id").map_err(classify_sqlx_error)?;
                let status: String = row.try_get("install_status").map_err(classify_sqlx_error)?;
                let model_id = ApplianceModelId::new(model)
                    .map_err(|e| SourceError::Query(format!("unit {unit_id}: {e}")))?;
                Ok(InventoryUnit::new(unit_id, model_id, InstallStatus::new(status)))
            })
            .collect()
    }
}
