// parser.rs - Line-oriented INI parser that keeps comments

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::Document;

/// Errors raised while reading INI text. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: nested sections are not supported: {text}")]
    NestedSection { line: usize, text: String },

    #[error("line {line}: malformed section header: {text}")]
    BadSectionHeader { line: usize, text: String },

    #[error("line {line}: duplicate section [{name}]")]
    DuplicateSection { line: usize, name: String },

    #[error("line {line}: duplicate option '{key}'")]
    DuplicateOption { line: usize, key: String },

    #[error("line {line}: unterminated quoted value")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unexpected text after quoted value: {text}")]
    TrailingText { line: usize, text: String },

    #[error("line {line}: expected 'key = value', found: {text}")]
    InvalidLine { line: usize, text: String },
}

fn section_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^(\[+)([^\[\]]*)(\]+)\s*(#.*)?$").expect("section header pattern is valid")
    })
}

/// Full-line comments start with `#` or `;`
pub(crate) fn is_comment(stripped: &str) -> bool {
    stripped.starts_with('#') || stripped.starts_with(';')
}

/// Parse INI text into a [`Document`].
///
/// Blank and comment lines are collected until the next header or option and
/// attached to it. The block before anything else is the initial comment,
/// whatever is left at the end is the final comment.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    let mut pending: Vec<String> = Vec::new();
    let mut started = false;
    let mut current: Option<usize> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let stripped = line.trim();

        if stripped.is_empty() || is_comment(stripped) {
            pending.push(line.to_string());
            continue;
        }

        if !started {
            doc.initial_comment = std::mem::take(&mut pending);
            started = true;
        }

        if stripped.starts_with('[') {
            let (name, inline) = parse_header(stripped, line_no)?;
            if doc.contains_section(&name) {
                return Err(ParseError::DuplicateSection { line: line_no, name });
            }
            let section = doc.add_section(&name);
            section.set_header_comments(std::mem::take(&mut pending));
            section.set_header_inline(inline);
            current = Some(doc.sections.len() - 1);
            continue;
        }

        let (key, value, inline) = parse_option(stripped, line_no)?;
        let section = match current {
            Some(i) => &mut doc.sections[i],
            None => &mut doc.root,
        };
        if section.contains(&key) {
            return Err(ParseError::DuplicateOption { line: line_no, key });
        }
        section.set(&key, &value);
        section.set_comments(&key, std::mem::take(&mut pending));
        if let Some(comment) = inline {
            section.set_inline_comment(&key, &comment);
        }
    }

    if started {
        doc.final_comment = pending;
    } else {
        doc.initial_comment = pending;
    }

    Ok(doc)
}

fn parse_header(stripped: &str, line: usize) -> Result<(String, Option<String>), ParseError> {
    let bad = || ParseError::BadSectionHeader {
        line,
        text: stripped.to_string(),
    };

    let caps = section_header().captures(stripped).ok_or_else(bad)?;
    let open = caps[1].len();
    let close = caps[3].len();

    if open != close {
        return Err(bad());
    }
    if open > 1 {
        return Err(ParseError::NestedSection {
            line,
            text: stripped.to_string(),
        });
    }

    let name = caps[2].trim();
    if name.is_empty() {
        return Err(bad());
    }

    let inline = caps.get(4).map(|m| m.as_str().trim_end().to_string());
    Ok((name.to_string(), inline))
}

fn parse_option(stripped: &str, line: usize) -> Result<(String, String, Option<String>), ParseError> {
    let invalid = || ParseError::InvalidLine {
        line,
        text: stripped.to_string(),
    };

    let (key, rest) = match split_quoted(stripped, line)? {
        // A quoted name may be empty or hold '='
        Some((key, tail)) => (key, tail.trim_start().strip_prefix('=').ok_or_else(invalid)?),
        None => {
            let (key, rest) = stripped.split_once('=').ok_or_else(invalid)?;
            let key = key.trim();
            if key.is_empty() {
                return Err(invalid());
            }
            (key, rest)
        }
    };

    let (value, inline) = parse_value(rest.trim(), line)?;
    Ok((key.to_string(), value, inline))
}

/// Split a leading quoted token off `text`, trying triple quotes first.
/// Yields the unquoted body and whatever follows the closing quote, or
/// `None` when `text` does not start with a quote.
fn split_quoted(text: &str, line: usize) -> Result<Option<(&str, &str)>, ParseError> {
    const QUOTES: [&str; 4] = ["\"\"\"", "'''", "\"", "'"];

    let Some(quote) = QUOTES.into_iter().find(|q| text.starts_with(*q)) else {
        return Ok(None);
    };

    let body = &text[quote.len()..];
    let end = body.find(quote).ok_or(ParseError::UnterminatedQuote { line })?;
    Ok(Some((&body[..end], &body[end + quote.len()..])))
}

fn parse_value(rest: &str, line: usize) -> Result<(String, Option<String>), ParseError> {
    if let Some((value, tail)) = split_quoted(rest, line)? {
        let value = value.to_string();
        let tail = tail.trim();

        return if tail.is_empty() {
            Ok((value, None))
        } else if tail.starts_with('#') {
            Ok((value, Some(tail.to_string())))
        } else {
            Err(ParseError::TrailingText {
                line,
                text: tail.to_string(),
            })
        };
    }

    match rest.find('#') {
        Some(i) => Ok((rest[..i].trim_end().to_string(), Some(rest[i..].to_string()))),
        None => Ok((rest.to_string(), None)),
    }
}
