//! JSON-with-comments parsing for configuration documents.

use camino::Utf8Path;
use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostic, SourceFile, codes};

/// Outcome of [`parse_config_text`].
///
/// `value` is always usable: on error it is an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConfigText {
    /// The parsed document.
    pub value: Value,
    /// The syntax error, if any, attributed to the parsed file.
    pub error: Option<Diagnostic>,
}

/// Parse a configuration document.
///
/// Comments, trailing commas and the other JSON5 relaxations are accepted.
/// A document containing only whitespace and comments parses as an empty
/// object. The first syntax error is reported as a single diagnostic with a
/// byte span into `text`.
///
/// ```
/// use camino::Utf8Path;
/// use tsconfig_resolver::parse_config_text;
///
/// let parsed = parse_config_text(
///     Utf8Path::new("tsconfig.json"),
///     "{\n  // strictness\n  \"compilerOptions\": { \"strict\": true, },\n}",
/// );
/// assert!(parsed.error.is_none());
/// assert_eq!(parsed.value["compilerOptions"]["strict"], true);
/// ```
#[must_use]
pub fn parse_config_text(path: &Utf8Path, text: &str) -> ParsedConfigText {
    match first_significant_char(text) {
        Leading::Trivia => return parsed(Value::Object(Map::new())),
        Leading::Char(_, '{') => {}
        Leading::Char(offset, ch) => {
            return failed(
                path,
                text,
                Diagnostic::new("'{' expected.")
                    .with_code(codes::SYNTAX_ERROR)
                    .with_span(offset, ch.len_utf8()),
            );
        }
        Leading::UnclosedComment(offset) => {
            return failed(
                path,
                text,
                Diagnostic::new("'*/' expected.")
                    .with_code(codes::SYNTAX_ERROR)
                    .with_span(offset, 2),
            );
        }
    }
    match json5::from_str::<Value>(text) {
        Ok(value) => parsed(value),
        Err(json5::Error::Message { msg, location }) => {
            let start = location.map_or(0, |loc| byte_offset(text, loc.line, loc.column));
            let length = usize::from(start < text.len());
            failed(
                path,
                text,
                Diagnostic::new(summarise_message(&msg))
                    .with_code(codes::SYNTAX_ERROR)
                    .with_span(start, length),
            )
        }
    }
}

const fn parsed(value: Value) -> ParsedConfigText {
    ParsedConfigText { value, error: None }
}

fn failed(path: &Utf8Path, text: &str, diagnostic: Diagnostic) -> ParsedConfigText {
    tracing::debug!(path = %path, message = diagnostic.message_text(), "configuration text is malformed");
    ParsedConfigText {
        value: Value::Object(Map::new()),
        error: Some(diagnostic.with_file(SourceFile::new(path, text))),
    }
}

/// What precedes the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
    /// Only whitespace, byte-order marks and comments.
    Trivia,
    /// The first significant character and its byte offset.
    Char(usize, char),
    /// A block comment starting at this offset is never closed.
    UnclosedComment(usize),
}

/// Skip whitespace, a BOM and comments up to the first significant character.
fn first_significant_char(text: &str) -> Leading {
    let mut chars = text.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '\u{feff}' => {}
            c if c.is_whitespace() => {}
            '/' => match chars.peek().map(|&(_, next)| next) {
                Some('/') => {
                    for (_, c) in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut previous = '\0';
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if previous == '*' && c == '/' {
                            closed = true;
                            break;
                        }
                        previous = c;
                    }
                    if !closed {
                        return Leading::UnclosedComment(offset);
                    }
                }
                _ => return Leading::Char(offset, ch),
            },
            _ => return Leading::Char(offset, ch),
        }
    }
    Leading::Trivia
}

/// Convert a 1-based line and character column into a byte offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, content) in text.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            return offset
                + content
                    .char_indices()
                    .nth(column.saturating_sub(1))
                    .map_or(content.len(), |(byte, _)| byte);
        }
        offset += content.len();
    }
    offset
}

/// Reduce a multi-line parser report to its explanatory line.
fn summarise_message(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("= "))
        .or_else(|| message.lines().map(str::trim).find(|line| !line.is_empty()))
        .unwrap_or(message)
        .to_owned()
}
