// section.rs - A named group of options with their attached comments

use std::collections::HashMap;

/// One `[section]` of an INI document.
///
/// Options keep their insertion order. Comment lists live in a side mapping
/// keyed by option name, so a comment list can be set before the option
/// itself exists; removing an option drops its comments as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
    comments: HashMap<String, Vec<String>>,
    inline_comments: HashMap<String, String>,
    header_comments: Vec<String>,
    header_inline: Option<String>,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Section name; empty for the root section
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Value of an option, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    /// Option names in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `(key, value)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Create or overwrite an option, returning the previous value.
    /// An overwritten option keeps its position.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        match self.position(key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value.to_string())),
            None => {
                self.entries.push((key.to_string(), value.to_string()));
                None
            }
        }
    }

    /// Delete an option together with its comment list and inline comment
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let i = self.position(key)?;
        self.comments.remove(key);
        self.inline_comments.remove(key);
        Some(self.entries.remove(i).1)
    }

    /// Comment lines attached to an option (empty when none)
    pub fn comments(&self, key: &str) -> &[String] {
        self.comments.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_comments(&mut self, key: &str, comments: Vec<String>) {
        self.comments.insert(key.to_string(), comments);
    }

    pub fn inline_comment(&self, key: &str) -> Option<&str> {
        self.inline_comments.get(key).map(String::as_str)
    }

    pub fn set_inline_comment(&mut self, key: &str, comment: &str) {
        self.inline_comments.insert(key.to_string(), comment.to_string());
    }

    /// Comment lines rendered above the `[name]` header
    pub fn header_comments(&self) -> &[String] {
        &self.header_comments
    }

    pub fn set_header_comments(&mut self, comments: Vec<String>) {
        self.header_comments = comments;
    }

    pub fn header_inline(&self) -> Option<&str> {
        self.header_inline.as_deref()
    }

    pub fn set_header_inline(&mut self, comment: Option<String>) {
        self.header_inline = comment;
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
