use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from an optional `tagpane.toml` in the listing directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// External editor for bulk edits. Falls back to $VISUAL, then $EDITOR,
    /// then `vi`.
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides, e.g. `highlight = "#FB4196"`.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
