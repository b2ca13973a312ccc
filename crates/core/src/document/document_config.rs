use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENTITY_SCHEME, DEFAULT_SCHEMA_HREF};

/// Per-document settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentConfig {
    /// Skip unit and value checks in `set` (default: false).
    /// Concept and context checks always run.
    pub trusted_input: bool,

    /// Scheme of the entity identifier written to XML contexts
    pub entity_scheme: String,

    /// Schema reference written to both wire formats
    pub schema_href: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            trusted_input: false,
            entity_scheme: DEFAULT_ENTITY_SCHEME.to_string(),
            schema_href: DEFAULT_SCHEMA_HREF.to_string(),
        }
    }
}

impl DocumentConfig {
    pub fn trusted() -> Self {
        Self {
            trusted_input: true,
            ..Self::default()
        }
    }
}
