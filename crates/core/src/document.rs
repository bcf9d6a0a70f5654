//! Document-level entry points tying the pipeline together.

use std::path::Path;

use serde::Serialize;

use crate::assembler::assemble_region;
use crate::error::{Diagnostic, DiagnosticKind, ParseDiagnostics, XcompareError};
use crate::frontmatter::{empty_object, split_frontmatter};
use crate::layout::{LayoutModel, resolve};
use crate::lines::LineIndex;
use crate::options::ExtractOptions;
use crate::tokenizer::Tokenizer;

/// Raw contents of one MDX file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Identifier, usually the file path.
    pub path: Option<String>,
    /// Full file contents.
    pub text: String,
}

impl SourceDocument {
    /// A document without a path.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
        }
    }

    /// A document identified by `path`.
    pub fn with_path(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            text: text.into(),
        }
    }

    /// Read a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, XcompareError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(Self::with_path(path.to_string_lossy(), text))
    }

    /// Identifier used in reports.
    pub fn id(&self) -> &str {
        self.path.as_deref().unwrap_or("<anonymous>")
    }
}

/// Layout model and diagnostics produced by one parse pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    /// Render-ready layout.
    pub layout: LayoutModel,
    /// Issues recorded while parsing.
    pub diagnostics: ParseDiagnostics,
}

impl ParseOutcome {
    /// True when no error-level diagnostic was recorded.
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// Split into layout and diagnostics.
    pub fn into_parts(self) -> (LayoutModel, ParseDiagnostics) {
        (self.layout, self.diagnostics)
    }
}

/// Parse text with the default options.
pub fn parse(text: &str) -> ParseOutcome {
    parse_with_options(text, &ExtractOptions::default())
}

/// Parse text with explicit options.
pub fn parse_with_options(text: &str, options: &ExtractOptions) -> ParseOutcome {
    run(None, text, options)
}

/// Parse a document; its path is carried into the layout and diagnostic locations.
pub fn parse_document(document: &SourceDocument, options: &ExtractOptions) -> ParseOutcome {
    run(document.path.as_deref(), &document.text, options)
}

fn run(path: Option<&str>, text: &str, options: &ExtractOptions) -> ParseOutcome {
    let index = LineIndex::new(text).with_file(path);
    let mut diagnostics = ParseDiagnostics::new();

    let (frontmatter, body_start) = if options.frontmatter {
        match split_frontmatter(text) {
            Ok(found) => (found.value, found.body_start),
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidFrontmatter,
                    0,
                    index.location(0),
                    err.to_string(),
                ));
                (empty_object(), 0)
            }
        }
    } else {
        (empty_object(), 0)
    };

    let mut groups = Vec::new();
    for region in Tokenizer::starting_at(text, options, body_start) {
        match region {
            Ok(region) => groups.extend(assemble_region(&region, &mut diagnostics, &index)),
            Err(err) => diagnostics.push(Diagnostic::from_tokenize(&err, &index)),
        }
    }

    let layout = LayoutModel::new(path.map(str::to_string), frontmatter, resolve(groups, options));
    log::debug!(
        "{}: {} group(s), {} diagnostic(s)",
        path.unwrap_or("<anonymous>"),
        layout.len(),
        diagnostics.count()
    );

    ParseOutcome {
        layout,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    #[test]
    fn from_path_reports_io_errors() {
        let err = SourceDocument::from_path("/definitely/not/here.mdx").unwrap_err();
        assert!(matches!(err, XcompareError::Io(_)), "{err:?}");
    }

    #[test]
    fn document_id_defaults() {
        assert_eq!(SourceDocument::new("x").id(), "<anonymous>");
        assert_eq!(SourceDocument::with_path("a.mdx", "x").id(), "a.mdx");
    }

    #[test]
    fn frontmatter_is_not_scanned() {
        let text = "---\ntitle: \"<Editor>\"\n---\n<Editor>\n```go\nx\n```\n</Editor>\n";
        let outcome = parse(text);
        assert!(outcome.is_ok());
        assert_eq!(outcome.layout.len(), 1);
        assert_eq!(outcome.layout.frontmatter_str("title"), Some("<Editor>"));
    }

    #[test]
    fn invalid_frontmatter_is_a_warning() {
        let text = "---\ntitle: [oops\n---\n<Editor>\n```go\nx\n```\n</Editor>\n";
        let outcome = parse(text);
        assert_eq!(outcome.layout.len(), 1);
        let kinds: Vec<_> = outcome.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [DiagnosticKind::InvalidFrontmatter]);
        assert!(outcome.is_ok());
    }

    #[test]
    fn frontmatter_can_be_disabled() {
        let options = ExtractOptions {
            frontmatter: false,
            ..ExtractOptions::default()
        };
        let outcome = parse_with_options("---\ntitle: x\n---\n", &options);
        assert_eq!(outcome.layout.frontmatter, empty_object());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn document_path_flows_into_locations() {
        let document = SourceDocument::with_path("docs/errors.mdx", "intro\n<Editor>\n```go\n");
        let outcome = parse_document(&document, &ExtractOptions::default());
        assert_eq!(outcome.layout.path.as_deref(), Some("docs/errors.mdx"));

        let diagnostic = outcome.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.location.to_string(), "docs/errors.mdx:2:1");
    }
}
