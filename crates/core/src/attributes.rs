//! JSX-style attribute parsing for component opening tags.
//!
//! Only `title` and `compare` are interpreted. Every other attribute is kept
//! verbatim, in source order, without evaluating the expression language.

use serde::Serialize;

/// Value side of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AttrValue {
    /// Shorthand attribute with no value (`compare`).
    Bare,
    /// Quoted string (`title="X"`), quotes removed.
    Quoted(String),
    /// Expression body between braces (`compare={true}` stores `true`).
    Expression(String),
}

impl AttrValue {
    /// Whether the value is the templating convention's true-token.
    pub fn is_true(&self) -> bool {
        match self {
            AttrValue::Bare => true,
            AttrValue::Quoted(value) => value == "true",
            AttrValue::Expression(expr) => expr.trim() == "true",
        }
    }

    /// Text content: quoted values as written, string-literal expressions unquoted,
    /// other expressions verbatim (trimmed). Shorthand attributes have none.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Bare => None,
            AttrValue::Quoted(value) => Some(value),
            AttrValue::Expression(expr) => Some(unquote_literal(expr).unwrap_or(expr.trim())),
        }
    }
}

/// A single attribute as written in the opening tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name. Spread attributes (`{...props}`) have an empty name.
    pub name: String,
    /// Attribute value.
    pub value: AttrValue,
}

/// Attributes of a component region: the recognized keys plus everything else.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAttributes {
    /// Text of the `title` attribute.
    pub title: Option<String>,
    /// Raw `compare` attribute value.
    pub compare: Option<AttrValue>,
    /// Unrecognized attributes in source order.
    pub other: Vec<Attribute>,
}

impl RegionAttributes {
    /// Whether `compare` is present and set to the true-token.
    pub fn is_compare(&self) -> bool {
        self.compare.as_ref().is_some_and(AttrValue::is_true)
    }

    /// Look up an unrecognized attribute; the last occurrence wins.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.other
            .iter()
            .rev()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }
}

/// Extent of an opening tag found by [`scan_opening_tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpeningTag<'a> {
    /// Attribute source between the component name and `>` (or `/>`).
    pub attrs: &'a str,
    /// Byte offset one past the closing `>`.
    pub end: usize,
    /// Whether the tag ends with `/>`.
    pub self_closing: bool,
}

/// Find the `>` ending an opening tag whose attributes start at `start`.
///
/// Quotes and `{...}` expressions are skipped, so `title={"a > b"}` does not end
/// the tag early. Returns `None` when the text ends first.
pub(crate) fn scan_opening_tag(text: &str, start: usize) -> Option<OpeningTag<'_>> {
    let src = &text[start..];
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = src.char_indices();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' && depth > 0 {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '`' if depth > 0 => quote = Some(c),
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => {
                let before = src[..i].trim_end();
                let self_closing = before.ends_with('/');
                let attrs = if self_closing {
                    before[..before.len() - 1].trim_end()
                } else {
                    &src[..i]
                };
                return Some(OpeningTag {
                    attrs,
                    end: start + i + 1,
                    self_closing,
                });
            }
            _ => {}
        }
    }

    None
}

/// Parse the attribute source of an opening tag.
pub fn parse_attributes(src: &str) -> RegionAttributes {
    let mut attributes = RegionAttributes::default();
    let mut cursor = Cursor::new(src);

    loop {
        cursor.skip_whitespace();
        let Some(c) = cursor.peek() else {
            break;
        };

        if c == '/' {
            cursor.bump();
            continue;
        }

        if c == '{' {
            let body = cursor.braced();
            attributes.other.push(Attribute {
                name: String::new(),
                value: AttrValue::Expression(body.to_string()),
            });
            continue;
        }

        let name = cursor.eat_while(|c| !c.is_whitespace() && !matches!(c, '=' | '/' | '{'));
        if name.is_empty() {
            // Stray character such as a lone quote; drop it and move on.
            cursor.bump();
            continue;
        }

        cursor.skip_whitespace();
        let value = if cursor.peek() == Some('=') {
            cursor.bump();
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(q @ ('"' | '\'')) => AttrValue::Quoted(cursor.quoted(q).to_string()),
                Some('{') => AttrValue::Expression(cursor.braced().to_string()),
                Some(_) => AttrValue::Quoted(
                    cursor
                        .eat_while(|c| !c.is_whitespace() && c != '/')
                        .to_string(),
                ),
                None => AttrValue::Bare,
            }
        } else {
            AttrValue::Bare
        };

        match name {
            "title" => attributes.title = value.as_text().map(str::to_string),
            "compare" => attributes.compare = Some(value),
            _ => attributes.other.push(Attribute {
                name: name.to_string(),
                value,
            }),
        }
    }

    attributes
}

/// Strip matching quotes from a single JS string literal.
fn unquote_literal(expr: &str) -> Option<&str> {
    let trimmed = expr.trim();
    let quote = trimmed.chars().next()?;
    if !matches!(quote, '"' | '\'' | '`') || trimmed.len() < 2 || !trimmed.ends_with(quote) {
        return None;
    }
    let inner = &trimmed[1..trimmed.len() - 1];
    (!inner.contains(quote)).then_some(inner)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Consume a quoted string starting at the current quote, returning its body.
    fn quoted(&mut self, quote: char) -> &'a str {
        self.bump();
        let body = self.eat_while(|c| c != quote);
        self.bump();
        body
    }

    /// Consume a balanced `{...}` expression, returning the text between the braces.
    /// An unbalanced expression runs to the end of the source.
    fn braced(&mut self) -> &'a str {
        self.bump();
        let start = self.pos;
        let mut depth = 1usize;
        let mut quote: Option<char> = None;

        while let Some(c) = self.bump() {
            match quote {
                Some(_) if c == '\\' => {
                    self.bump();
                }
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None => match c {
                    '"' | '\'' | '`' => quote = Some(c),
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return &self.src[start..self.pos - 1];
                        }
                    }
                    _ => {}
                },
            }
        }

        &self.src[start..]
    }
}
