// mod.rs - INI document model, parser, writer and file store

pub mod parser;
pub mod section;
pub mod store;
pub mod writer;

use std::str::FromStr;

// Re-export main types for convenience
pub use parser::ParseError;
pub use section::Section;
pub use store::{DocumentStore, IniFileStore, StoreError};
pub use writer::RenderError;

/// In-memory representation of a whole INI file.
///
/// Options that appear before the first `[header]` belong to the unnamed
/// root section. Named sections keep their file order and their names are
/// unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    initial_comment: Vec<String>,
    final_comment: Vec<String>,
    root: Section,
    sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse(text)
    }

    /// Comment block at the top of the file
    pub fn initial_comment(&self) -> &[String] {
        &self.initial_comment
    }

    /// Comment block after the last option
    pub fn final_comment(&self) -> &[String] {
        &self.final_comment
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// First declared section, used when no section is named explicitly
    pub fn first_section_name(&self) -> Option<&str> {
        self.sections.first().map(Section::name)
    }

    pub(crate) fn contains_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name() == name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    /// Get a section, appending an empty one if it does not exist yet
    pub(crate) fn add_section(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name() == name) {
            Some(i) => i,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
