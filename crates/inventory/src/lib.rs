//! Inventory stock gate.
//!
//! Read-only: this crate answers "is there a unit of this model in stock?"
//! and never reserves or adjusts inventory. The data store sits behind
//! [`InventoryUnitSource`]; adapters live in `tiergate-infra`.

pub mod gate;
pub mod source;
pub mod unit;

pub use gate::{LookupOptions, StockAvailabilityGate, StockLookupError};
pub use source::{InventoryUnitSource, SourceError};
pub use unit::{InstallStatus, InventoryUnit};
