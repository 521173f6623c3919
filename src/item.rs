use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inventory item record as supplied by the warehouse subsystem.
///
/// The engine treats this as read-only input: coded attribute fields are
/// resolved through an [`AttributeCatalog`](crate::AttributeCatalog), the
/// free-form `attributes` map contributes dynamic label parameters, and
/// everything else feeds the layout heuristics directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItem {
    /// Stable item identifier.
    pub id: String,
    /// Display name printed as the label headline.
    pub name: String,
    /// Article number; also the preferred QR payload.
    pub sku: Option<String>,
    pub brand_code: Option<String>,
    pub quality_code: Option<String>,
    pub material_code: Option<String>,
    pub size_code: Option<String>,
    /// Color code. The upstream record still carries the legacy field name.
    #[serde(alias = "attributeCode")]
    pub color_code: Option<String>,
    /// Free-form attribute map. Object-valued entries are upstream-internal
    /// and are skipped during parameter resolution.
    pub attributes: BTreeMap<String, Value>,
    /// Material composition, name → percent.
    pub material_composition: BTreeMap<String, f64>,
    pub selling_price: Option<f64>,
    /// Category display name.
    pub category: Option<String>,
}

impl InventoryItem {
    /// Payload encoded into the label's QR code: SKU when present, item id
    /// otherwise.
    pub fn qr_payload(&self) -> &str {
        match self.sku.as_deref() {
            Some(sku) if !sku.is_empty() => sku,
            _ => &self.id,
        }
    }

    /// True when the composition map has at least one entry.
    pub fn has_composition(&self) -> bool {
        !self.material_composition.is_empty()
    }
}
