//! Line scanning over borrowed document text.

use crate::error::SourceLocation;

/// Returns the line starting at `start` (without its `\n` or trailing `\r`)
/// and the cursor where the following line begins.
pub(crate) fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    let rest = &input[start..];
    let (line, next) = match rest.find('\n') {
        Some(pos) => (&rest[..pos], start + pos + 1),
        None => (rest, input.len()),
    };
    Some((line.strip_suffix('\r').unwrap_or(line), next))
}

/// Maps byte offsets of one document to 1-indexed line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    file: Option<String>,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Indexes the line starts of `text`.
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self {
            text,
            file: None,
            line_starts,
        }
    }

    /// Attaches a file path that will be carried by every produced location.
    pub fn with_file(mut self, file: Option<&str>) -> Self {
        self.file = file.map(str::to_string);
        self
    }

    /// Resolves a byte offset. Offsets past the end clamp to the end of text.
    pub fn location(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|start| *start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self
            .text
            .get(line_start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - line_start)
            + 1;

        match &self.file {
            Some(file) => SourceLocation::with_file(file.clone(), line, column),
            None => SourceLocation::new(line, column),
        }
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
