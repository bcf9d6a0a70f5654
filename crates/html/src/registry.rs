//! Language display names used for pane captions.
//!
//! Keys are matched case-insensitively; `Go`, `go` and `GO` resolve to the
//! same entry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from a fence language tag to a human readable name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRegistry {
    /// Display names keyed by lowercase language tag.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl LanguageRegistry {
    /// An empty registry. Captions fall back to the raw tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names for the languages that appear in JavaScript-to-Go tutorials.
    ///
    /// ```
    /// use xcompare_html::LanguageRegistry;
    ///
    /// let registry = LanguageRegistry::defaults();
    /// assert_eq!(registry.display_name("js"), Some("JavaScript"));
    /// assert_eq!(registry.display_name("Go"), Some("Go"));
    /// ```
    pub fn defaults() -> Self {
        [
            ("js", "JavaScript"),
            ("javascript", "JavaScript"),
            ("jsx", "JSX"),
            ("ts", "TypeScript"),
            ("typescript", "TypeScript"),
            ("tsx", "TSX"),
            ("go", "Go"),
            ("golang", "Go"),
            ("bash", "Bash"),
            ("sh", "Shell"),
            ("shell", "Shell"),
            ("json", "JSON"),
            ("yaml", "YAML"),
            ("yml", "YAML"),
            ("toml", "TOML"),
            ("dockerfile", "Dockerfile"),
            ("sql", "SQL"),
            ("proto", "Protocol Buffers"),
            ("html", "HTML"),
            ("css", "CSS"),
        ]
        .into_iter()
        .fold(Self::new(), |registry, (tag, name)| registry.with(tag, name))
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, tag: &str, name: impl Into<String>) -> Self {
        self.insert(tag, name);
        self
    }

    /// Register or replace the display name for `tag`.
    pub fn insert(&mut self, tag: &str, name: impl Into<String>) {
        self.names.insert(tag.to_ascii_lowercase(), name.into());
    }

    /// Entries of `other` override entries of `self`.
    pub fn merge(&mut self, other: LanguageRegistry) {
        for (tag, name) in other.names {
            self.insert(&tag, name);
        }
    }

    /// Display name for a language tag.
    pub fn display_name(&self, tag: &str) -> Option<&str> {
        self.names
            .get(&tag.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no tag is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
