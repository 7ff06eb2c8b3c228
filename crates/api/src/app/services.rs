use anyhow::Context;
use tracing::{info, warn};

use tiergate_infra::{GateConfig, InMemoryInventoryUnits, PostgresInventoryUnits};
use tiergate_inventory::StockAvailabilityGate;

/// Shared services handed to every handler.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub stock_gate: StockAvailabilityGate,
}

impl AppServices {
    pub fn new(stock_gate: StockAvailabilityGate) -> Self {
        Self { stock_gate }
    }

    /// Pick the inventory adapter from configuration.
    pub fn from_config(config: &GateConfig) -> anyhow::Result<Self> {
        let gate = match &config.database_url {
            Some(url) => {
                let units = PostgresInventoryUnits::connect_lazy(
                    url,
                    config.db_max_connections,
                    config.lookup_timeout,
                )
                .context("invalid DATABASE_URL")?;
                info!(
                    max_connections = config.db_max_connections,
                    "using postgres inventory store"
                );
                StockAvailabilityGate::new(units)
            }
            None => {
                warn!("DATABASE_URL not set; serving stock lookups from an empty in-memory store");
                StockAvailabilityGate::new(InMemoryInventoryUnits::new())
            }
        };

        Ok(Self::new(gate.with_default_timeout(config.lookup_timeout)))
    }
}
