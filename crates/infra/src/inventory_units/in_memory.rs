use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use tiergate_core::ApplianceModelId;
use tiergate_inventory::{InventoryUnit, InventoryUnitSource, SourceError};

/// In-memory inventory store for tests/dev.
///
/// Stands in for the external store, so it has a write side for seeding.
/// The stock gate itself only ever reads.
#[derive(Debug, Default)]
pub struct InMemoryInventoryUnits {
    inner: RwLock<HashMap<ApplianceModelId, Vec<InventoryUnit>>>,
}

impl InMemoryInventoryUnits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(units: impl IntoIterator<Item = InventoryUnit>) -> Self {
        let mut map = HashMap::new();
        for unit in units {
            insert_unit(&mut map, unit);
        }
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Insert a unit, replacing any unit with the same `unit_id`.
    pub fn upsert(&self, unit: InventoryUnit) -> Result<(), SourceError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        insert_unit(&mut map, unit);
        Ok(())
    }

    /// Number of units held, whatever their status.
    pub fn unit_count(&self) -> Result<usize, SourceError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().map(Vec::len).sum())
    }
}

fn insert_unit(map: &mut HashMap<ApplianceModelId, Vec<InventoryUnit>>, unit: InventoryUnit) {
    for units in map.values_mut() {
        units.retain(|u| u.unit_id != unit.unit_id);
    }
    map.entry(unit.model_id.clone()).or_default().push(unit);
}

// A poisoned lock is a broken store, not an empty one.
fn poisoned() -> SourceError {
    SourceError::Unavailable("in-memory inventory lock poisoned".to_string())
}

#[async_trait]
impl InventoryUnitSource for InMemoryInventoryUnits {
    async fn find_in_stock_units(
        &self,
        model_id: &ApplianceModelId,
    ) -> Result<Vec<InventoryUnit>, SourceError> {
        let map = self.inner.read().map_err(|_| poisoned())?;

        Ok(map
            .get(model_id)
            .map(|units| {
                units
                    .iter()
                    .filter(|u| u.install_status.is_in_stock())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
