//! Designer configuration.

use serde::{Deserialize, Serialize};

use crate::axis::ConfigAxis;
use crate::error::DesignerError;
use crate::store::DEFAULT_STORAGE_KEY;

/// Settings a host passes to [`Designer::new`](crate::Designer::new).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use cineshelf_designer::DesignerConfig;
///
/// let config = DesignerConfig::from_json_str(r#"{ "productName": "My Shelf" }"#).unwrap();
/// assert_eq!(config.product_name, "My Shelf");
/// assert_eq!(config.style_container_id, "cineshelf-custom-styles");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignerConfig {
    /// Key the tree is persisted under.
    pub storage_key: String,
    /// Id of the single style element holding the compiled sheet.
    pub style_container_id: String,
    /// Id of the element holding the preview cards.
    pub preview_container_id: String,
    /// Used to name exported files.
    pub product_name: String,
    /// Axis selected when the designer starts.
    pub initial_axis: ConfigAxis,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            style_container_id: "cineshelf-custom-styles".to_string(),
            preview_container_id: "cssPreviewGrid".to_string(),
            product_name: "CineShelf".to_string(),
            initial_axis: ConfigAxis::default(),
        }
    }
}

impl DesignerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, DesignerError> {
        Ok(serde_json::from_str(json)?)
    }
}
