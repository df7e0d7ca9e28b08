use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory. Every field has a
/// default so a missing or empty file behaves like stock settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key-hint strip in the bottom status row
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Ask y/n before deleting a task
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            confirm_delete: true,
        }
    }
}

fn default_true() -> bool {
    true
}
