use serde::Serialize;
use thiserror::Error;

use crate::lines::LineIndex;

/// Source location information for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Failures raised while scanning a document for component regions and code blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A fence opener with no matching closer inside its region.
    #[error("unterminated code block starting at byte {offset}")]
    UnterminatedBlock {
        /// Byte offset of the opening fence line.
        offset: usize,
    },
    /// A component opening tag with no closing tag before the next opener.
    #[error("unterminated <{component}> region starting at byte {offset}")]
    UnterminatedRegion {
        /// Component name as written in the document.
        component: String,
        /// Byte offset of the opening `<`.
        offset: usize,
    },
}

impl TokenizeError {
    /// Byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            TokenizeError::UnterminatedBlock { offset }
            | TokenizeError::UnterminatedRegion { offset, .. } => *offset,
        }
    }

    /// Diagnostic kind recorded for this error.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            TokenizeError::UnterminatedBlock { .. } => DiagnosticKind::UnterminatedBlock,
            TokenizeError::UnterminatedRegion { .. } => DiagnosticKind::UnterminatedRegion,
        }
    }
}

/// Failures raised while turning a region into a comparison group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The region holds no fenced code block.
    #[error("<{component}> region starting at byte {offset} contains no code blocks")]
    EmptyRegion {
        /// Component name as written in the document.
        component: String,
        /// Byte offset of the opening `<`.
        offset: usize,
    },
}

impl AssembleError {
    /// Byte offset the error refers to.
    pub fn offset(&self) -> usize {
        match self {
            AssembleError::EmptyRegion { offset, .. } => *offset,
        }
    }
}

/// Errors from the fallible operations around the pure pipeline.
#[derive(Debug, Error)]
pub enum XcompareError {
    /// IO error while loading a source document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Options JSON could not be deserialized.
    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Kinds of recorded parse issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Fenced block without a closer; the block was skipped.
    UnterminatedBlock,
    /// Component region without a closer; text up to the next opener was skipped.
    UnterminatedRegion,
    /// Component region without code blocks; the region was dropped.
    EmptyRegion,
    /// Leading YAML frontmatter could not be parsed.
    InvalidFrontmatter,
}

impl DiagnosticKind {
    /// Severity attached to every diagnostic of this kind.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::UnterminatedRegion => Severity::Error,
            DiagnosticKind::UnterminatedBlock
            | DiagnosticKind::EmptyRegion
            | DiagnosticKind::InvalidFrontmatter => Severity::Warning,
        }
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Content was lost; the caller may want to fail a build.
    Error,
    /// Content was degraded or dropped locally.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A recorded, non-fatal parse issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Severity derived from the kind.
    pub severity: Severity,
    /// Byte offset into the document.
    pub offset: usize,
    /// Line/column form of `offset`.
    pub location: SourceLocation,
    /// Human readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic; severity follows from `kind`.
    pub fn new(
        kind: DiagnosticKind,
        offset: usize,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            offset,
            location,
            message: message.into(),
        }
    }

    /// Diagnostic for a tokenizer failure.
    pub fn from_tokenize(err: &TokenizeError, index: &LineIndex<'_>) -> Self {
        Self::new(
            err.kind(),
            err.offset(),
            index.location(err.offset()),
            err.to_string(),
        )
    }

    /// Diagnostic for an assembler failure.
    pub fn from_assemble(err: &AssembleError, index: &LineIndex<'_>) -> Self {
        Self::new(
            DiagnosticKind::EmptyRegion,
            err.offset(),
            index.location(err.offset()),
            err.to_string(),
        )
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.location, self.message)
    }
}

/// Diagnostics collected for one document, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParseDiagnostics {
    items: Vec<Diagnostic>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    /// All diagnostics in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Error-level diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Warning-level diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.iter().filter(move |d| d.kind == kind)
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Consume into the underlying list.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a ParseDiagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
