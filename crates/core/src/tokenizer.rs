//! Block tokenizer: locates comparison component regions and their fenced code blocks.
//!
//! Scanning is a single forward pass over borrowed text. [`Tokenizer`] yields one
//! [`ComponentRegion`] per component invocation; each region hands out a fresh
//! [`CodeBlocks`] iterator over the fenced blocks between its tags.
//!
//! Component markers are ignored inside top-level code fences and inline code
//! spans, so pages that show the component syntax itself are not misread.
//! Regions do not nest: a second opener before the closing tag leaves the first
//! region unterminated.

use serde::Serialize;

use crate::attributes::{RegionAttributes, parse_attributes, scan_opening_tag};
use crate::code_fence::{
    FencePhase, FenceState, advance_fence_state, is_fence_closer, parse_fence_info,
    parse_fence_opener, strip_indent,
};
use crate::error::TokenizeError;
use crate::lines::next_line;
use crate::options::ExtractOptions;

/// One component invocation located in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRegion<'a> {
    /// Component name as written.
    pub component: &'a str,
    /// Byte offset of the opening `<`.
    pub start_offset: usize,
    /// Byte offset one past the closing tag's `>`.
    pub end_offset: usize,
    /// Parsed opening-tag attributes.
    pub attributes: RegionAttributes,
    /// Text between the opening and closing tags.
    pub raw_inner: &'a str,
    /// Byte offset of `raw_inner` within the document.
    pub inner_offset: usize,
    /// Whether the invocation was written as `<Name ... />`.
    pub self_closing: bool,
    #[serde(skip)]
    role_marker: &'a str,
}

impl<'a> ComponentRegion<'a> {
    /// Fenced code blocks inside the region, in source order.
    pub fn code_blocks(&self) -> CodeBlocks<'a> {
        CodeBlocks {
            inner: self.raw_inner,
            base: self.inner_offset,
            role_marker: self.role_marker,
            cursor: 0,
            ordinal: 0,
            done: false,
        }
    }
}

/// One fenced code block captured inside a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Language identifier (`js`, `go`, ...), absent for a bare fence.
    pub language_tag: Option<String>,
    /// Role marker following the language tag, if any.
    pub role_marker: Option<String>,
    /// Label following the role marker.
    pub label: Option<String>,
    /// Raw info string after the language tag.
    pub meta: Option<String>,
    /// Block contents without the fence lines.
    pub code: String,
    /// 0-based position among the region's captured blocks.
    pub ordinal: usize,
    /// Byte offset of the opening fence line within the document.
    pub start_offset: usize,
}

/// Lazy sequence of [`CodeBlock`]s drawn from a region's inner text.
///
/// An unterminated fence yields [`TokenizeError::UnterminatedBlock`]; scanning
/// then continues on the line after its opener, so later blocks in the region
/// are still captured.
#[derive(Debug, Clone)]
pub struct CodeBlocks<'a> {
    inner: &'a str,
    base: usize,
    role_marker: &'a str,
    cursor: usize,
    ordinal: usize,
    done: bool,
}

impl Iterator for CodeBlocks<'_> {
    type Item = Result<CodeBlock, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some((line, next)) = next_line(self.inner, self.cursor) {
            let line_start = self.cursor;
            self.cursor = next;
            let resume = next;

            let Some(opener) = parse_fence_opener(line) else {
                continue;
            };

            let mut code_lines = Vec::new();
            let mut closed = false;
            while let Some((body_line, after)) = next_line(self.inner, self.cursor) {
                self.cursor = after;
                if is_fence_closer(body_line, opener.marker, opener.length) {
                    closed = true;
                    break;
                }
                code_lines.push(strip_indent(body_line, opener.indent));
            }

            if !closed {
                self.cursor = resume;
                return Some(Err(TokenizeError::UnterminatedBlock {
                    offset: self.base + line_start,
                }));
            }

            let info = parse_fence_info(opener.info, self.role_marker);
            let block = CodeBlock {
                language_tag: info.language_tag,
                role_marker: info.role_marker,
                label: info.label,
                meta: info.meta,
                code: code_lines.join("\n"),
                ordinal: self.ordinal,
                start_offset: self.base + line_start,
            };
            self.ordinal += 1;
            return Some(Ok(block));
        }

        self.done = true;
        None
    }
}

impl std::iter::FusedIterator for CodeBlocks<'_> {}

/// Single-pass scanner yielding the component regions of one document.
///
/// A region whose closing tag does not appear before the next component opener
/// (or the end of the text) yields [`TokenizeError::UnterminatedRegion`]. The
/// scan then resumes at that next opener; with none left the tokenizer is
/// exhausted. Re-scanning requires a new tokenizer.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    text: &'a str,
    options: &'a ExtractOptions,
    cursor: usize,
    fence: FenceState,
    finished: bool,
}

/// Where an unterminated region leaves the scan.
enum RegionScan<'a> {
    Complete(ComponentRegion<'a>),
    Unterminated { resume_at: Option<usize> },
}

/// How a region body ends.
enum BodyEnd {
    Closed { inner_end: usize, end_offset: usize },
    Open { resume_at: Option<usize> },
}

impl<'a> Tokenizer<'a> {
    /// Scan `text` from the beginning.
    pub fn new(text: &'a str, options: &'a ExtractOptions) -> Self {
        Self::starting_at(text, options, 0)
    }

    /// Scan `text` from byte `offset` (e.g. past frontmatter). Offsets in the
    /// produced regions stay relative to the whole text.
    pub fn starting_at(text: &'a str, options: &'a ExtractOptions, offset: usize) -> Self {
        Self {
            text,
            options,
            cursor: offset.min(text.len()),
            fence: FenceState::default(),
            finished: false,
        }
    }

    fn read_region(&self, start: usize, component: &'a str) -> RegionScan<'a> {
        let text = self.text;
        let name_end = start + 1 + component.len();

        let Some(tag) = scan_opening_tag(text, name_end) else {
            return RegionScan::Unterminated {
                resume_at: self.next_opener(name_end),
            };
        };
        let attributes = parse_attributes(tag.attrs);

        let (inner_end, end_offset) = if tag.self_closing {
            (tag.end, tag.end)
        } else {
            match self.scan_body(tag.end, component) {
                BodyEnd::Closed {
                    inner_end,
                    end_offset,
                } => (inner_end, end_offset),
                BodyEnd::Open { resume_at } => return RegionScan::Unterminated { resume_at },
            }
        };

        RegionScan::Complete(ComponentRegion {
            component,
            start_offset: start,
            end_offset,
            attributes,
            raw_inner: &text[tag.end..inner_end],
            inner_offset: tag.end,
            self_closing: tag.self_closing,
            role_marker: self.options.role_marker.as_str(),
        })
    }

    /// Find the closing tag of a region whose body starts at `from`.
    ///
    /// A closing tag inside fenced code is code, unless that fence is still open
    /// when the next component opener or the end of the text is reached. An
    /// opener outside fences before any closing tag leaves the region open.
    fn scan_body(&self, from: usize, component: &str) -> BodyEnd {
        let names = &self.options.component_names;
        let mut fence = FenceState::default();
        let mut fenced_closer: Option<(usize, usize)> = None;
        let mut cursor = from;

        while let Some((line, next)) = next_line(self.text, cursor) {
            let outcome = advance_fence_state(line, fence);
            fence = outcome.next_state;
            let closer = find_closing_tag(line, component)
                .map(|(start, end)| (cursor + start, cursor + end));
            let opener = find_component_start(line, names).map(|(column, _)| cursor + column);

            if outcome.in_fence {
                if let Some((inner_end, end_offset)) = fenced_closer
                    && opener.is_some()
                {
                    return BodyEnd::Closed {
                        inner_end,
                        end_offset,
                    };
                }
                if fenced_closer.is_none() {
                    fenced_closer = closer;
                }
                if fence.phase == FencePhase::Outside {
                    fenced_closer = None;
                }
            } else {
                match (closer, opener) {
                    (Some((inner_end, end_offset)), opener)
                        if opener.is_none_or(|at| inner_end < at) =>
                    {
                        return BodyEnd::Closed {
                            inner_end,
                            end_offset,
                        };
                    }
                    (_, Some(at)) => return BodyEnd::Open { resume_at: Some(at) },
                    _ => {}
                }
            }

            cursor = next;
        }

        match fenced_closer {
            Some((inner_end, end_offset)) => BodyEnd::Closed {
                inner_end,
                end_offset,
            },
            None => BodyEnd::Open { resume_at: None },
        }
    }

    /// Offset of the first component opener at or after `from`, outside fences
    /// and inline code.
    fn next_opener(&self, from: usize) -> Option<usize> {
        let mut fence = FenceState::default();
        let mut cursor = from;

        while let Some((line, next)) = next_line(self.text, cursor) {
            let outcome = advance_fence_state(line, fence);
            fence = outcome.next_state;
            if !outcome.in_fence
                && let Some((column, _)) =
                    find_component_start(line, &self.options.component_names)
            {
                return Some(cursor + column);
            }
            cursor = next;
        }

        None
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<ComponentRegion<'a>, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some((line, next)) = next_line(self.text, self.cursor) {
            let line_start = self.cursor;
            let outcome = advance_fence_state(line, self.fence);
            self.fence = outcome.next_state;

            if !outcome.in_fence
                && let Some((column, name_len)) =
                    find_component_start(line, &self.options.component_names)
            {
                let start = line_start + column;
                let component = &self.text[start + 1..start + 1 + name_len];
                return Some(match self.read_region(start, component) {
                    RegionScan::Complete(region) => {
                        self.cursor = region.end_offset;
                        Ok(region)
                    }
                    RegionScan::Unterminated { resume_at } => {
                        match resume_at {
                            Some(offset) => {
                                self.cursor = offset;
                                self.fence = FenceState::default();
                            }
                            None => self.finished = true,
                        }
                        Err(TokenizeError::UnterminatedRegion {
                            component: component.to_string(),
                            offset: start,
                        })
                    }
                });
            }

            self.cursor = next;
        }

        self.finished = true;
        None
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Earliest `<Name` on the line for a recognized name, outside inline code.
/// Returns the byte column of `<` and the name length.
fn find_component_start(line: &str, names: &[String]) -> Option<(usize, usize)> {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let needle = format!("<{name}");
            line.match_indices(&needle)
                .map(|(column, _)| column)
                .find(|&column| {
                    let follows = line[column + needle.len()..].chars().next();
                    let boundary =
                        follows.is_none_or(|c| c.is_whitespace() || c == '>' || c == '/');
                    boundary && !inside_inline_code(line, column)
                })
                .map(|column| (column, name.len()))
        })
        .min_by_key(|(column, _)| *column)
}

/// An odd number of backticks before `column` means we are inside a code span.
fn inside_inline_code(line: &str, column: usize) -> bool {
    line[..column].bytes().filter(|b| *b == b'`').count() % 2 == 1
}

/// First `</name>` on the line (whitespace allowed before `>`).
/// Returns the column of `<` and one past `>`.
fn find_closing_tag(line: &str, name: &str) -> Option<(usize, usize)> {
    let needle = format!("</{name}");
    line.match_indices(&needle).find_map(|(start, _)| {
        let after_name = start + needle.len();
        let rest = &line[after_name..];
        let trimmed = rest.trim_start();
        trimmed
            .starts_with('>')
            .then(|| (start, after_name + (rest.len() - trimmed.len()) + 1))
    })
}
