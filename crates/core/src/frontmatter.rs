use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::lines::next_line;

/// Leading YAML block of a document and where the body starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Parsed frontmatter as a JSON object (empty when absent).
    pub value: JsonValue,
    /// Byte offset inside the original document where the body begins.
    pub body_start: usize,
}

impl Frontmatter {
    fn absent() -> Self {
        Self {
            value: empty_object(),
            body_start: 0,
        }
    }
}

/// Errors emitted while parsing or extracting frontmatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    /// Unclosed YAML fence (e.g., missing terminating `---`).
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// An empty JSON object, the value used when a document has no frontmatter.
pub fn empty_object() -> JsonValue {
    JsonValue::Object(Default::default())
}

/// Splits a leading `---` fenced YAML block from the document body.
///
/// Blank lines and a byte-order mark may precede the opening fence.
pub fn split_frontmatter(input: &str) -> Result<Frontmatter, FrontmatterError> {
    let mut cursor = input.strip_prefix('\u{feff}').map_or(0, |_| '\u{feff}'.len_utf8());

    let block_start = loop {
        match next_line(input, cursor) {
            Some((line, next)) if line.trim().is_empty() => cursor = next,
            Some((line, next)) if line == "---" => break next,
            _ => return Ok(Frontmatter::absent()),
        }
    };

    cursor = block_start;
    while let Some((line, next)) = next_line(input, cursor) {
        if line == "---" {
            let value = parse_yaml(&input[block_start..cursor])?;
            return Ok(Frontmatter {
                value,
                body_start: next,
            });
        }
        cursor = next;
    }

    Err(FrontmatterError::Unterminated)
}

fn parse_yaml(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(empty_object());
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(empty_object()),
        value @ JsonValue::Object(_) => Ok(value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}
