use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from shelf.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfConfig {
    pub shelf: ShelfInfo,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfInfo {
    pub name: String,
}

/// The signed-in profile. The shelf only ever shows this user's tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user")]
    pub user: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            user: default_user(),
        }
    }
}

fn default_user() -> String {
    "local".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides for the base theme (background, text, ...)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
