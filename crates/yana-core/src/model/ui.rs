use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// In-app notice shown above the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Visual variant (`"error"`, `"info"`, ...).
    #[serde(rename = "type")]
    pub banner_type: String,
    /// Text to display.
    pub message: String,
}

/// Presentation preferences, persisted under `UI`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiState {
    /// Banner currently displayed, if any.
    pub banner_content: Option<Banner>,
    /// Dark theme selected.
    pub is_dark_mode_active: bool,
    /// Fields owned by other screens, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User settings, persisted under `SETTINGS`.
///
/// Opaque to the core: restored and written back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    /// Settings entries.
    #[serde(flatten)]
    pub entries: Map<String, Value>,
}
