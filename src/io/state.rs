use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Tags selected in the filter bar
    #[serde(default)]
    pub selected_tags: Vec<String>,
    /// Last committed search term
    #[serde(default)]
    pub last_search: Option<String>,
    /// Search history (most recent first, max 200)
    #[serde(default)]
    pub search_history: Vec<String>,
    /// Cursor index into the visible list
    #[serde(default)]
    pub cursor: usize,
    /// Scroll offset (first visible row)
    #[serde(default)]
    pub scroll_offset: usize,
}

/// Read .state.json from the shelf directory
pub fn read_ui_state(shelf_dir: &Path) -> Option<UiState> {
    let path = shelf_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the shelf directory
pub fn write_ui_state(shelf_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = shelf_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
