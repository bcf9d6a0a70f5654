//! Pair assembler: turns one component region into one comparison group.

use serde::Serialize;

use crate::error::{AssembleError, Diagnostic, ParseDiagnostics};
use crate::lines::LineIndex;
use crate::tokenizer::{CodeBlock, ComponentRegion};

/// One authored teaching example: a titled set of code panes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonGroup {
    /// Component name the group came from.
    pub component: String,
    /// Title attribute text, if any.
    pub title: Option<String>,
    /// Whether the panes form a comparison. Never true with fewer than two panes.
    pub is_compare: bool,
    /// Code blocks in source order; never empty.
    pub panes: Vec<CodeBlock>,
    /// Byte offset of the region's opening `<`.
    pub start_offset: usize,
}

/// Build a group from a region and the blocks captured inside it.
///
/// A `compare` annotation on a single-pane region is dropped rather than
/// rejected, so the content still renders.
pub fn assemble(
    region: &ComponentRegion<'_>,
    blocks: Vec<CodeBlock>,
) -> Result<ComparisonGroup, AssembleError> {
    if blocks.is_empty() {
        return Err(AssembleError::EmptyRegion {
            component: region.component.to_string(),
            offset: region.start_offset,
        });
    }

    let requested = region.attributes.is_compare();
    let is_compare = requested && blocks.len() >= 2;
    if requested && !is_compare {
        log::debug!(
            "<{}> at byte {} requests compare with a single pane; rendering sequentially",
            region.component,
            region.start_offset
        );
    }

    Ok(ComparisonGroup {
        component: region.component.to_string(),
        title: region.attributes.title.clone(),
        is_compare,
        panes: blocks,
        start_offset: region.start_offset,
    })
}

/// Drain the region's code blocks and assemble them, recording diagnostics for
/// unterminated blocks and empty regions. Returns `None` when the region is dropped.
pub fn assemble_region(
    region: &ComponentRegion<'_>,
    diagnostics: &mut ParseDiagnostics,
    index: &LineIndex<'_>,
) -> Option<ComparisonGroup> {
    let mut blocks = Vec::new();
    for block in region.code_blocks() {
        match block {
            Ok(block) => blocks.push(block),
            Err(err) => diagnostics.push(Diagnostic::from_tokenize(&err, index)),
        }
    }

    match assemble(region, blocks) {
        Ok(group) => Some(group),
        Err(err) => {
            diagnostics.push(Diagnostic::from_assemble(&err, index));
            None
        }
    }
}
