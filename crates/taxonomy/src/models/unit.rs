use serde::{Deserialize, Serialize};

/// Unit registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unit id as used in `unitRef`, e.g. `USD` or `kW`
    pub id: String,
    /// Human readable name, e.g. `US Dollar`
    pub name: String,
    /// Namespace prefix of the measure, e.g. `iso4217`
    pub ns_prefix: String,
    /// Item type the unit measures, e.g. `monetaryItemType` or `powerItemType`
    pub item_type: String,
}

impl Unit {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        ns_prefix: impl Into<String>,
        item_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ns_prefix: ns_prefix.into(),
            item_type: item_type.into(),
        }
    }

    /// Measure text, e.g. `iso4217:USD`.
    pub fn measure(&self) -> String {
        format!("{}:{}", self.ns_prefix, self.id)
    }

    pub fn is_currency(&self) -> bool {
        self.item_type == "monetaryItemType"
    }
}
