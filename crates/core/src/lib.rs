#![deny(missing_docs)]
//! xcompare core: finds side-by-side code comparison components in MDX documents
//! and resolves them into a render-ready layout model.
//!
//! ```text
//! text → Tokenizer → ComponentRegion / CodeBlock → assemble → ComparisonGroup
//!      → resolve → LayoutModel (+ ParseDiagnostics)
//! ```

/// Opening-tag attribute parsing.
pub mod attributes;
/// Pair assembler.
pub mod assembler;
/// Batch processing across documents.
pub mod batch;
/// Code fence detection utilities.
pub mod code_fence;
/// Document-level parse entry points.
pub mod document;
/// Core error and diagnostic types.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Layout resolver and layout model.
pub mod layout;
/// Line scanning and offset-to-location mapping.
pub mod lines;
/// Extraction options.
pub mod options;
/// Anchor slug generation.
pub mod slug;
/// Block tokenizer.
pub mod tokenizer;

pub use assembler::{ComparisonGroup, assemble, assemble_region};
pub use attributes::{AttrValue, Attribute, RegionAttributes, parse_attributes};
pub use batch::{
    BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats, process_batch,
    process_paths,
};
pub use document::{ParseOutcome, SourceDocument, parse, parse_document, parse_with_options};
pub use error::{
    AssembleError, Diagnostic, DiagnosticKind, ParseDiagnostics, Severity, SourceLocation,
    TokenizeError, XcompareError,
};
pub use frontmatter::{Frontmatter, FrontmatterError, split_frontmatter};
pub use layout::{LayoutModel, ResolvedGroup, resolve, resolve_group};
pub use lines::LineIndex;
pub use options::{DEFAULT_COMPONENT_NAMES, DEFAULT_ROLE_MARKER, ExtractOptions};
pub use slug::{Slugger, slugify};
pub use tokenizer::{CodeBlock, CodeBlocks, ComponentRegion, Tokenizer};
