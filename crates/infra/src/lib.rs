//! Infrastructure layer: configuration and inventory store adapters.

pub mod config;
pub mod inventory_units;

pub use config::{ConfigError, GateConfig};
pub use inventory_units::{InMemoryInventoryUnits, PostgresInventoryUnits};
