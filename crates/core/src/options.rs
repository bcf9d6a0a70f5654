//! Extraction options.

use serde::{Deserialize, Serialize};

use crate::XcompareError;

/// Component names treated as comparison editors when no options are given.
pub const DEFAULT_COMPONENT_NAMES: &[&str] = &["UniversalEditor", "Editor"];

/// Info-string token marking a fenced block as a comparison pane.
pub const DEFAULT_ROLE_MARKER: &str = "!!";

/// Options controlling how documents are scanned.
///
/// Deserializes from camelCase JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractOptions {
    /// Component names whose invocations are comparison regions.
    pub component_names: Vec<String>,
    /// Token that must directly follow the language tag to mark a pane role.
    pub role_marker: String,
    /// Parse leading YAML frontmatter and skip it while scanning.
    pub frontmatter: bool,
    /// Derive anchor slugs from group titles.
    pub anchors: bool,
}

impl ExtractOptions {
    /// Defaults for the `UniversalEditor` tutorial corpus.
    pub fn universal_editor() -> Self {
        Self {
            component_names: DEFAULT_COMPONENT_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            role_marker: DEFAULT_ROLE_MARKER.to_string(),
            frontmatter: true,
            anchors: true,
        }
    }

    /// Defaults, but recognizing a single component name.
    pub fn for_component(name: impl Into<String>) -> Self {
        Self {
            component_names: vec![name.into()],
            ..Self::universal_editor()
        }
    }

    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, XcompareError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether `name` is a recognized component.
    pub fn recognizes(&self, name: &str) -> bool {
        self.component_names.iter().any(|known| known == name)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::universal_editor()
    }
}
