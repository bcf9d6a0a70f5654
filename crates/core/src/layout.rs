//! Layout resolver: decides pane arrangement and builds the document layout model.
//!
//! Groups keep the order in which they were authored. Adjacent groups are never
//! merged, even with equal titles, and panes keep their source order.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::assembler::ComparisonGroup;
use crate::options::ExtractOptions;
use crate::slug::Slugger;
use crate::tokenizer::CodeBlock;

/// A comparison group with its resolved arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGroup {
    /// The assembled group.
    pub group: ComparisonGroup,
    /// Render panes next to each other instead of one after another.
    pub side_by_side: bool,
    /// Indices into `group.panes` in display order.
    pub pane_order: Vec<usize>,
    /// Unique anchor derived from the title.
    pub anchor: Option<String>,
}

impl ResolvedGroup {
    /// Panes in display order.
    pub fn panes(&self) -> impl Iterator<Item = &CodeBlock> {
        self.pane_order
            .iter()
            .filter_map(|&index| self.group.panes.get(index))
    }

    /// Title of the underlying group.
    pub fn title(&self) -> Option<&str> {
        self.group.title.as_deref()
    }
}

/// Render-ready description of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutModel {
    /// Path of the source document, when known.
    pub path: Option<String>,
    /// Frontmatter as a JSON object.
    pub frontmatter: JsonValue,
    /// Groups in source order.
    pub groups: Vec<ResolvedGroup>,
}

impl LayoutModel {
    /// Assemble a layout model.
    pub fn new(path: Option<String>, frontmatter: JsonValue, groups: Vec<ResolvedGroup>) -> Self {
        Self {
            path,
            frontmatter,
            groups,
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the document produced no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups laid out side by side.
    pub fn side_by_side_count(&self) -> usize {
        self.groups.iter().filter(|g| g.side_by_side).count()
    }

    /// String value of a frontmatter key.
    pub fn frontmatter_str(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).and_then(JsonValue::as_str)
    }
}

/// Resolve a single group. Titles are slugged through `slugger` when given.
pub fn resolve_group(group: ComparisonGroup, slugger: Option<&mut Slugger>) -> ResolvedGroup {
    let anchor = match (slugger, group.title.as_deref()) {
        (Some(slugger), Some(title)) => Some(slugger.next_slug(title)),
        _ => None,
    };

    ResolvedGroup {
        side_by_side: group.is_compare,
        pane_order: (0..group.panes.len()).collect(),
        anchor,
        group,
    }
}

/// Resolve all groups of one document, preserving order.
pub fn resolve(groups: Vec<ComparisonGroup>, options: &ExtractOptions) -> Vec<ResolvedGroup> {
    let mut slugger = options.anchors.then(Slugger::new);
    groups
        .into_iter()
        .map(|group| resolve_group(group, slugger.as_mut()))
        .collect()
}
