// writer.rs - Serialize a Document back to INI text

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use super::parser::is_comment;
use super::{Document, Section};

/// Quote forms tried in order when a key or value has to be quoted
const QUOTES: [&str; 4] = ["\"", "'", "\"\"\"", "'''"];

/// An option that has no INI spelling that reads back unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("option '{key}' in [{section}] cannot be written as INI text")]
pub struct RenderError {
    pub section: String,
    pub key: String,
}

/// Normalize one stored comment line for output.
/// Blank lines stay blank; text without a comment marker gets `# `.
pub fn format_comment(line: &str) -> Cow<'_, str> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || is_comment(trimmed) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(format!("# {}", trimmed))
    }
}

/// Wrap `text` in the first quote form that the parser reads back unchanged.
/// A triple quote cannot be used when the text ends with its quote char.
fn wrap(text: &str) -> Option<String> {
    if text.contains('\n') || text.contains('\r') {
        return None;
    }
    QUOTES
        .iter()
        .find(|q| !text.contains(*q) && (q.len() == 1 || !text.ends_with(&q[..1])))
        .map(|q| format!("{q}{text}{q}"))
}

fn starts_with_quote(text: &str) -> bool {
    text.starts_with('"') || text.starts_with('\'')
}

/// Spelling of a value, quoted when writing it bare would not read back
/// the same. `None` when no quote form can hold it.
pub fn quote_value(value: &str) -> Option<Cow<'_, str>> {
    let needs_quotes = value.is_empty()
        || value.contains('#')
        || value.trim() != value
        || starts_with_quote(value);

    if needs_quotes {
        wrap(value).map(Cow::Owned)
    } else if value.contains('\n') || value.contains('\r') {
        None
    } else {
        Some(Cow::Borrowed(value))
    }
}

/// Spelling of an option name. Names that would read as a comment, a
/// header, a quoted name or that hold `=` are quoted.
pub fn quote_key(key: &str) -> Option<Cow<'_, str>> {
    let needs_quotes = key.is_empty()
        || is_comment(key)
        || key.starts_with('[')
        || starts_with_quote(key)
        || key.contains('=')
        || key.trim() != key;

    if needs_quotes {
        wrap(key).map(Cow::Owned)
    } else if key.contains('\n') || key.contains('\r') {
        None
    } else {
        Some(Cow::Borrowed(key))
    }
}

fn write_comments(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
    for line in lines.iter().flat_map(|l| l.split('\n')) {
        writeln!(f, "{}", format_comment(line.trim_end_matches('\r')))?;
    }
    Ok(())
}

fn write_options(f: &mut fmt::Formatter<'_>, section: &Section) -> fmt::Result {
    for (key, value) in section.iter() {
        let spelled_key = quote_key(key).ok_or(fmt::Error)?;
        let spelled_value = quote_value(value).ok_or(fmt::Error)?;

        write_comments(f, section.comments(key))?;
        write!(f, "{} = {}", spelled_key, spelled_value)?;
        if let Some(inline) = section.inline_comment(key) {
            write!(f, " {}", inline)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn check_section(section: &Section) -> Result<(), RenderError> {
    for (key, value) in section.iter() {
        if quote_key(key).is_none() || quote_value(value).is_none() {
            return Err(RenderError {
                section: section.name().to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

impl Document {
    /// Serialize back to INI text, failing on options that cannot be spelled
    pub fn render(&self) -> Result<String, RenderError> {
        check_section(self.root())?;
        for section in self.sections() {
            check_section(section)?;
        }
        Ok(self.to_string())
    }
}

/// Formatting a document holding an option rejected by [`Document::render`]
/// returns `fmt::Error`.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_comments(f, self.initial_comment())?;
        write_options(f, self.root())?;

        for section in self.sections() {
            write_comments(f, section.header_comments())?;
            write!(f, "[{}]", section.name())?;
            if let Some(inline) = section.header_inline() {
                write!(f, " {}", inline)?;
            }
            writeln!(f)?;
            write_options(f, section)?;
        }

        write_comments(f, self.final_comment())
    }
}
