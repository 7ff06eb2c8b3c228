use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use tiergate_core::{ApplianceModelId, Entity};

/// Install status code as stored by the external inventory schema.
///
/// Only [`InstallStatus::IN_STOCK`] has meaning here; other codes are carried
/// through untouched so the schema can grow without changes on this side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallStatus(Cow<'static, str>);

impl InstallStatus {
    /// External code for "In Stock".
    pub const IN_STOCK_CODE: &'static str = "6";

    pub const IN_STOCK: InstallStatus = InstallStatus(Cow::Borrowed(Self::IN_STOCK_CODE));

    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_in_stock(&self) -> bool {
        *self == Self::IN_STOCK
    }
}

impl core::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One physical appliance as reported by the inventory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUnit {
    pub unit_id: String,
    pub model_id: ApplianceModelId,
    pub install_status: InstallStatus,
}

impl InventoryUnit {
    pub fn new(
        unit_id: impl Into<String>,
        model_id: ApplianceModelId,
        install_status: InstallStatus,
    ) -> Self {
        Self {
            unit_id: unit_id.into(),
            model_id,
            install_status,
        }
    }

    /// Whether this unit can satisfy a request for `model_id` right now.
    pub fn is_available_for(&self, model_id: &ApplianceModelId) -> bool {
        self.model_id == *model_id && self.install_status.is_in_stock()
    }
}

impl Entity for InventoryUnit {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.unit_id
    }
}
