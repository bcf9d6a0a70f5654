//! Code fence detection utilities.
//!
//! Fences follow CommonMark: 0-3 spaces of indentation, a run of at least three
//! backticks or tildes, and a closer that repeats the opener's marker at least
//! as many times with nothing but whitespace after it.

/// Fence parsing phases tracked across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FencePhase {
    /// Not currently inside a fence.
    #[default]
    Outside,
    /// Within fence contents.
    InsideFence,
}

/// Current fence state (phase, marker, indent, and length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceState {
    /// Current fence phase.
    pub phase: FencePhase,
    /// Fence marker character (``` or ~~~).
    pub marker: Option<char>,
    /// Leading whitespace count captured at opening.
    pub indent: usize,
    /// Length of the opening fence (number of ` or ~ characters).
    pub length: usize,
}

/// Outcome of processing a single line for fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParseOutcome {
    /// State to carry into the next line.
    pub next_state: FenceState,
    /// Whether the line belongs to a fence (opener, content, or closer).
    pub in_fence: bool,
}

/// Opening line of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOpener<'a> {
    /// Fence marker character.
    pub marker: char,
    /// Number of marker characters.
    pub length: usize,
    /// Visual indentation of the opener.
    pub indent: usize,
    /// Trimmed info string following the markers.
    pub info: &'a str,
}

/// Info string split into the tokens the comparison convention uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FenceInfo {
    /// First info token (`js` in ```` ```js !! js ````).
    pub language_tag: Option<String>,
    /// Role marker when it directly follows the language tag.
    pub role_marker: Option<String>,
    /// Token after the role marker.
    pub label: Option<String>,
    /// Raw info text after the language tag.
    pub meta: Option<String>,
}

/// Advance fence state based on a single line of text.
pub fn advance_fence_state(line: &str, state: FenceState) -> LineParseOutcome {
    match state.phase {
        FencePhase::Outside => match parse_fence_opener(line) {
            Some(opener) => LineParseOutcome {
                next_state: FenceState {
                    phase: FencePhase::InsideFence,
                    marker: Some(opener.marker),
                    indent: opener.indent,
                    length: opener.length,
                },
                in_fence: true,
            },
            None => LineParseOutcome {
                next_state: state,
                in_fence: false,
            },
        },
        FencePhase::InsideFence => {
            let closes = state
                .marker
                .is_some_and(|marker| is_fence_closer(line, marker, state.length));
            LineParseOutcome {
                next_state: if closes { FenceState::default() } else { state },
                in_fence: true,
            }
        }
    }
}

/// Parse a fence opener line, returning `None` for anything else.
pub fn parse_fence_opener(line: &str) -> Option<FenceOpener<'_>> {
    let (indent, byte_offset) = leading_whitespace_info(line);
    // 4+ columns is an indented code block, not a fence
    if indent > 3 {
        return None;
    }

    let after_indent = &line[byte_offset..];
    let (marker, length) = detect_fence_run(after_indent)?;
    let info = after_indent[length..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }

    Some(FenceOpener {
        marker,
        length,
        indent,
        info,
    })
}

/// Check whether `line` closes a fence opened with `marker` repeated `length` times.
pub fn is_fence_closer(line: &str, marker: char, length: usize) -> bool {
    let (indent, byte_offset) = leading_whitespace_info(line);
    if indent > 3 {
        return false;
    }

    let after_indent = &line[byte_offset..];
    match detect_fence_run(after_indent) {
        Some((found, run)) if found == marker && run >= length => {
            after_indent[run..].trim().is_empty()
        }
        _ => false,
    }
}

/// Split an info string into language tag, role marker, and label.
///
/// The role marker only counts when it is the second token; a fence such as
/// ```` ```go title="main.go" ```` keeps its language and meta but has no role.
pub fn parse_fence_info(info: &str, role_marker: &str) -> FenceInfo {
    let info = info.trim();
    let mut tokens = info.split_whitespace();
    let Some(language) = tokens.next() else {
        return FenceInfo::default();
    };

    let meta = info[language.len()..].trim();
    let mut parsed = FenceInfo {
        language_tag: Some(language.to_string()),
        meta: (!meta.is_empty()).then(|| meta.to_string()),
        ..FenceInfo::default()
    };

    if !role_marker.is_empty() && tokens.next() == Some(role_marker) {
        parsed.role_marker = Some(role_marker.to_string());
        parsed.label = tokens.next().map(str::to_string);
    }

    parsed
}

/// Remove up to `indent` leading spaces from a content line.
pub(crate) fn strip_indent(line: &str, indent: usize) -> &str {
    let spaces = line
        .bytes()
        .take(indent)
        .take_while(|b| *b == b' ')
        .count();
    &line[spaces..]
}

/// Returns (visual_columns, byte_offset) for leading whitespace.
/// Visual columns expand tabs to 4-column boundaries per CommonMark.
fn leading_whitespace_info(line: &str) -> (usize, usize) {
    let mut col = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => col += 1,
            b'\t' => col += 4 - (col % 4),
            _ => break,
        }
        bytes += 1;
    }
    (col, bytes)
}

fn detect_fence_run(after_indent: &str) -> Option<(char, usize)> {
    let first = after_indent.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run = after_indent.chars().take_while(|c| *c == first).count();
    (run >= 3).then_some((first, run))
}
