//! Adapters implementing [`tiergate_inventory::InventoryUnitSource`].

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryInventoryUnits;
pub use postgres::PostgresInventoryUnits;
