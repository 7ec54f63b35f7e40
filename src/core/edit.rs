// edit.rs - Remove/add/comment mutations applied to one section

use std::str::FromStr;

use crate::core::EditError;
use crate::document::writer::{quote_key, quote_value};
use crate::document::{Document, DocumentStore, Section};

/// Resolved command-line options for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions {
    /// Target INI file
    pub filename: String,
    /// Explicit section; the first declared section is used when `None`
    pub section: Option<String>,
    /// `key=value` to create or overwrite; empty means no add
    pub add: String,
    /// Key to delete; empty means no removal
    pub remove: String,
    /// Comma separated comment lines; empty means no comment change
    pub comment: String,
    pub verbose: bool,
    /// Accepted for compatibility, has no effect
    pub print: bool,
    /// Skip persisting the document
    pub dry_run: bool,
}

/// A validated `--add` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSpec {
    pub key: String,
    pub value: String,
}

impl AddSpec {
    /// Split `key=value` on `=`. Exactly one separator is accepted; the key
    /// may be empty. Keys and values the writer cannot spell are refused here,
    /// before any file is read.
    pub fn parse(raw: &str) -> Result<Self, EditError> {
        let parts: Vec<&str> = raw.split('=').collect();
        if parts.len() != 2 {
            return Err(EditError::InvalidAddSpec(raw.to_string()));
        }

        let (key, value) = (parts[0].trim(), parts[1].trim());
        if quote_key(key).is_none() || quote_value(value).is_none() {
            return Err(EditError::UnwritableOption(raw.to_string()));
        }

        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl FromStr for AddSpec {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split a comma separated comment string into trimmed lines. A fragment
/// holding line breaks becomes one line per break.
/// An empty string means "no comments", not an empty list.
pub fn parse_comments(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .flat_map(|fragment| fragment.trim().split('\n'))
            .map(|line| line.trim().to_string())
            .collect(),
    )
}

/// Mutations requested for one run, validated before anything is touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    pub remove: Option<String>,
    pub add: Option<AddSpec>,
    pub comments: Option<Vec<String>>,
}

impl EditPlan {
    pub fn from_options(options: &EditOptions) -> Result<Self, EditError> {
        let add = if options.add.is_empty() {
            None
        } else {
            Some(AddSpec::parse(&options.add)?)
        };

        let remove = if options.remove.is_empty() {
            None
        } else {
            Some(options.remove.trim().to_string())
        };

        Ok(Self {
            remove,
            add,
            comments: parse_comments(&options.comment),
        })
    }

    /// True when the plan would not touch the document
    pub fn is_noop(&self) -> bool {
        self.remove.is_none() && self.add.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedOption {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedOption {
    pub key: String,
    pub value: String,
    /// Value that was overwritten, if the option already existed
    pub previous: Option<String>,
}

/// What an edit run did, for the verbose echo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditReport {
    pub section: Option<String>,
    pub comments: Option<Vec<String>>,
    pub removed: Option<RemovedOption>,
    pub added: Option<AddedOption>,
    pub persisted: bool,
}

/// Section to edit: the explicit one, or the first declared section
pub fn resolve_section(document: &Document, explicit: Option<&str>) -> Option<String> {
    match explicit {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => document.first_section_name().map(str::to_string),
    }
}

fn target_section<'a>(
    document: &'a mut Document,
    section: Option<&str>,
) -> Result<&'a mut Section, EditError> {
    let name = section.ok_or(EditError::NoResolvableSection)?;
    document
        .section_mut(name)
        .ok_or_else(|| EditError::SectionNotFound(name.to_string()))
}

/// Apply `plan` to `section` of `document`: removal first, then add.
///
/// The section is only looked up when the plan removes or adds something,
/// so a no-op plan succeeds even on a document without sections.
pub fn apply_edits(
    document: &mut Document,
    section: Option<&str>,
    plan: &EditPlan,
) -> Result<EditReport, EditError> {
    let mut report = EditReport {
        section: section.map(str::to_string),
        comments: plan.comments.clone(),
        ..EditReport::default()
    };

    if plan.is_noop() {
        return Ok(report);
    }

    let target = target_section(document, section)?;

    if let Some(key) = &plan.remove {
        // Comments set here go away with the option below
        if let Some(comments) = &plan.comments {
            target.set_comments(key, comments.clone());
        }
        let value = target
            .remove(key)
            .ok_or_else(|| EditError::MissingKeyOnRemove {
                section: target.name().to_string(),
                key: key.clone(),
            })?;
        report.removed = Some(RemovedOption {
            key: key.clone(),
            value,
        });
    }

    if let Some(add) = &plan.add {
        let previous = target.set(&add.key, &add.value);
        if let Some(comments) = &plan.comments {
            target.set_comments(&add.key, comments.clone());
        }
        report.added = Some(AddedOption {
            key: add.key.clone(),
            value: add.value.clone(),
            previous,
        });
    }

    Ok(report)
}

/// Load, mutate and (unless dry-run) persist one document.
///
/// The add spec is validated before the document is loaded, so a bad
/// `--add` never reaches the file.
pub fn run_edit<S: DocumentStore>(
    store: &S,
    options: &EditOptions,
) -> Result<(Document, EditReport), EditError> {
    run_edit_with(store, options, |_, _| Ok(()))
}

/// [`run_edit`] that hands the resolved section and the plan to
/// `before_apply` once the document is loaded and before it is mutated.
pub fn run_edit_with<S, F>(
    store: &S,
    options: &EditOptions,
    mut before_apply: F,
) -> Result<(Document, EditReport), EditError>
where
    S: DocumentStore,
    F: FnMut(Option<&str>, &EditPlan) -> Result<(), EditError>,
{
    let plan = EditPlan::from_options(options)?;
    let mut document = store.load()?;

    let section = resolve_section(&document, options.section.as_deref());
    before_apply(section.as_deref(), &plan)?;
    let mut report = apply_edits(&mut document, section.as_deref(), &plan)?;

    if !options.dry_run {
        store.persist(&document)?;
        report.persisted = true;
    }

    Ok((document, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::StoreError;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Store double that keeps the text in memory
    struct MemoryStore {
        path: PathBuf,
        text: RefCell<String>,
        writes: RefCell<usize>,
    }

    impl MemoryStore {
        fn new(text: &str) -> Self {
            Self {
                path: PathBuf::from("memory.ini"),
                text: RefCell::new(text.to_string()),
                writes: RefCell::new(0),
            }
        }

        fn text(&self) -> String {
            self.text.borrow().clone()
        }
    }

    impl DocumentStore for MemoryStore {
        fn location(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<Document, StoreError> {
            Document::parse(&self.text.borrow()).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
        }

        fn persist(&self, document: &Document) -> Result<(), StoreError> {
            *self.text.borrow_mut() = document.render().map_err(|source| StoreError::Render {
                path: self.path.clone(),
                source,
            })?;
            *self.writes.borrow_mut() += 1;
            Ok(())
        }
    }

    fn options(add: &str, remove: &str, comment: &str) -> EditOptions {
        EditOptions {
            filename: "memory.ini".to_string(),
            add: add.to_string(),
            remove: remove.to_string(),
            comment: comment.to_string(),
            ..EditOptions::default()
        }
    }

    #[test]
    fn test_add_spec_parse() {
        let spec = AddSpec::parse("  key  =  some value ").unwrap();
        assert_eq!(spec.key, "key");
        assert_eq!(spec.value, "some value");

        let empty_value: AddSpec = "key=".parse().unwrap();
        assert_eq!(empty_value.value, "");

        let empty_key = AddSpec::parse("  = x").unwrap();
        assert_eq!(empty_key.key, "");
        assert_eq!(empty_key.value, "x");

        for bad in ["novalue", "a=b=c", "=="] {
            assert!(
                matches!(AddSpec::parse(bad), Err(EditError::InvalidAddSpec(ref raw)) if raw == bad),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_comments() {
        assert_eq!(parse_comments(""), None);
        assert_eq!(
            parse_comments(" comment one ,comment two"),
            Some(vec!["comment one".to_string(), "comment two".to_string()])
        );
        assert_eq!(parse_comments("   "), Some(vec![String::new()]));
        assert_eq!(
            parse_comments("first\nsecond , third"),
            Some(vec!["first".to_string(), "second".to_string(), "third".to_string()])
        );
    }

    #[test]
    fn test_add_spec_rejects_unwritable_text() {
        for raw in ["k=line\nbreak", "k\r1=v", "k=\"\"\" and ''' #"] {
            assert!(
                matches!(AddSpec::parse(raw), Err(EditError::UnwritableOption(ref r)) if r == raw),
                "{:?} should be rejected",
                raw
            );
        }

        let store = MemoryStore::new("[general]\nfoo = 1\n");
        let err = run_edit(&store, &options("k=a\nb", "", "")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(*store.writes.borrow(), 0);
    }

    #[test]
    fn test_comment_with_line_break_round_trips() {
        let store = MemoryStore::new("[general]\n");
        let opts = options("k=1", "", "line one\nline two");

        run_edit(&store, &opts).unwrap();
        let first = store.text();
        assert_eq!(first, "[general]\n# line one\n# line two\nk = 1\n");

        run_edit(&store, &opts).unwrap();
        assert_eq!(store.text(), first);
    }

    #[test]
    fn test_comment_marker_key_round_trips() {
        let store = MemoryStore::new("[general]\nfoo = 1\n");
        for key in ["#k", ";k", "[k"] {
            let opts = options(&format!("{}=1", key), "", "");

            run_edit(&store, &opts).unwrap();
            let first = store.text();
            run_edit(&store, &opts).unwrap();

            assert_eq!(store.text(), first);
            assert_eq!(store.load().unwrap().section("general").unwrap().get(key), Some("1"));
        }
        assert_eq!(store.text(), "[general]\nfoo = 1\n\"#k\" = 1\n\";k\" = 1\n\"[k\" = 1\n");
    }

    #[test]
    fn test_empty_key_round_trips() {
        let store = MemoryStore::new("[general]\n");
        run_edit(&store, &options("=value", "", "")).unwrap();

        assert_eq!(store.text(), "[general]\n\"\" = value\n");
        assert_eq!(store.load().unwrap().section("general").unwrap().get(""), Some("value"));
    }

    #[test]
    fn test_value_with_both_quotes_round_trips() {
        let store = MemoryStore::new("[general]\n");
        let opts = options("msg=it's \"x\" #1", "", "");

        run_edit(&store, &opts).unwrap();
        let first = store.text();
        run_edit(&store, &opts).unwrap();

        assert_eq!(store.text(), first);
        let doc = store.load().unwrap();
        assert_eq!(doc.section("general").unwrap().get("msg"), Some("it's \"x\" #1"));
    }

    #[test]
    fn test_before_apply_sees_plan_even_when_edit_fails() {
        let store = MemoryStore::new("[general]\nfoo = 1\n");
        let mut seen = Vec::new();

        let result = run_edit_with(&store, &options("", "nope", ""), |section, plan| {
            seen.push((section.map(str::to_string), plan.remove.clone()));
            Ok(())
        });

        assert!(matches!(result, Err(EditError::MissingKeyOnRemove { .. })));
        assert_eq!(seen, vec![(Some("general".to_string()), Some("nope".to_string()))]);
    }

    #[test]
    fn test_resolve_section() {
        let doc = Document::parse("[general]\n[extra]\n").unwrap();
        assert_eq!(resolve_section(&doc, None), Some("general".to_string()));
        assert_eq!(resolve_section(&doc, Some("")), Some("general".to_string()));
        assert_eq!(resolve_section(&doc, Some("extra")), Some("extra".to_string()));
        assert_eq!(resolve_section(&Document::new(), None), None);
    }

    #[test]
    fn test_add_with_comment_example() {
        let store = MemoryStore::new("[general]\nfoo = 1\n");
        let (doc, report) = run_edit(&store, &options("bar=2", "", "note")).unwrap();

        let general = doc.section("general").unwrap();
        assert_eq!(general.get("foo"), Some("1"));
        assert_eq!(general.get("bar"), Some("2"));
        assert_eq!(general.comments("bar"), ["note"]);
        assert_eq!(store.text(), "[general]\nfoo = 1\n# note\nbar = 2\n");
        assert!(report.persisted);
        assert_eq!(report.section.as_deref(), Some("general"));
    }

    #[test]
    fn test_add_trims_key_and_value() {
        let mut doc = Document::parse("[general]\n").unwrap();
        let plan = EditPlan::from_options(&options("  spaced key =  spaced value  ", "", "")).unwrap();
        apply_edits(&mut doc, Some("general"), &plan).unwrap();

        assert_eq!(doc.section("general").unwrap().get("spaced key"), Some("spaced value"));
    }

    #[test]
    fn test_add_overwrites_and_reports_previous() {
        let mut doc = Document::parse("[general]\nfoo = 1\nbar = 2\n").unwrap();
        let plan = EditPlan::from_options(&options("foo=9", "", "")).unwrap();
        let report = apply_edits(&mut doc, Some("general"), &plan).unwrap();

        let added = report.added.unwrap();
        assert_eq!(added.previous.as_deref(), Some("1"));
        let keys: Vec<&str> = doc.section("general").unwrap().keys().collect();
        assert_eq!(keys, vec!["foo", "bar"]);
    }

    #[test]
    fn test_add_without_comment_keeps_existing_comments() {
        let mut doc = Document::parse("[general]\n# keep me\nfoo = 1\n").unwrap();
        let plan = EditPlan::from_options(&options("foo=2", "", "")).unwrap();
        apply_edits(&mut doc, Some("general"), &plan).unwrap();

        assert_eq!(doc.section("general").unwrap().comments("foo"), ["# keep me"]);
    }

    #[test]
    fn test_add_with_comment_replaces_comments() {
        let mut doc = Document::parse("[general]\n# old\nfoo = 1\n").unwrap();
        let plan = EditPlan::from_options(&options("foo=2", "", "a, b")).unwrap();
        apply_edits(&mut doc, Some("general"), &plan).unwrap();

        assert_eq!(doc.section("general").unwrap().comments("foo"), ["a", "b"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = MemoryStore::new("[general]\nfoo = 1\n");
        let opts = options("bar = 2", "", "first, second");

        run_edit(&store, &opts).unwrap();
        let first = store.text();
        run_edit(&store, &opts).unwrap();

        assert_eq!(store.text(), first);
    }

    #[test]
    fn test_invalid_add_leaves_file_untouched() {
        let store = MemoryStore::new("[general]\nfoo = 1\n");
        let err = run_edit(&store, &options("a=b=c", "foo", "")).unwrap_err();

        assert!(matches!(err, EditError::InvalidAddSpec(_)));
        assert_eq!(err.exit_code(), -1);
        assert_eq!(store.text(), "[general]\nfoo = 1\n");
        assert_eq!(*store.writes.borrow(), 0);
    }

    #[test]
    fn test_remove_existing_key() {
        let store = MemoryStore::new("[general]\n# about foo\nfoo = 1\nbar = 2\n");
        let (doc, report) = run_edit(&store, &options("", " foo ", "why, removed")).unwrap();

        let general = doc.section("general").unwrap();
        assert!(!general.contains("foo"));
        assert!(general.comments("foo").is_empty());
        assert_eq!(
            report.removed,
            Some(RemovedOption {
                key: "foo".to_string(),
                value: "1".to_string()
            })
        );
        assert_eq!(store.text(), "[general]\nbar = 2\n");
    }

    #[test]
    fn test_remove_missing_key_fails_without_write() {
        let store = MemoryStore::new("[general]\nfoo = 1\n");
        let err = run_edit(&store, &options("", "nope", "")).unwrap_err();

        assert!(matches!(err, EditError::MissingKeyOnRemove { ref key, .. } if key == "nope"));
        assert_ne!(err.exit_code(), 0);
        assert_eq!(*store.writes.borrow(), 0);
    }

    #[test]
    fn test_remove_then_add_same_key() {
        let mut doc = Document::parse("[general]\n# old\nfoo = 1\n").unwrap();
        let plan = EditPlan::from_options(&options("foo=2", "foo", "")).unwrap();
        apply_edits(&mut doc, Some("general"), &plan).unwrap();

        let general = doc.section("general").unwrap();
        assert_eq!(general.get("foo"), Some("2"));
        assert!(general.comments("foo").is_empty());
    }

    #[test]
    fn test_default_section_is_first() {
        let store = MemoryStore::new("[general]\nfoo = 1\n[extra]\nfoo = 1\n");
        run_edit(&store, &options("foo=2", "", "")).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.section("general").unwrap().get("foo"), Some("2"));
        assert_eq!(doc.section("extra").unwrap().get("foo"), Some("1"));
    }

    #[test]
    fn test_explicit_section() {
        let store = MemoryStore::new("[general]\nfoo = 1\n[extra]\nfoo = 1\n");
        let opts = EditOptions {
            section: Some("extra".to_string()),
            ..options("foo=2", "", "")
        };
        run_edit(&store, &opts).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.section("general").unwrap().get("foo"), Some("1"));
        assert_eq!(doc.section("extra").unwrap().get("foo"), Some("2"));
    }

    #[test]
    fn test_unknown_section() {
        let store = MemoryStore::new("[general]\n");
        let opts = EditOptions {
            section: Some("missing".to_string()),
            ..options("foo=2", "", "")
        };

        let err = run_edit(&store, &opts).unwrap_err();
        assert!(matches!(err, EditError::SectionNotFound(ref name) if name == "missing"));
    }

    #[test]
    fn test_no_resolvable_section() {
        let store = MemoryStore::new("root = 1\n");
        let err = run_edit(&store, &options("foo=2", "", "")).unwrap_err();

        assert!(matches!(err, EditError::NoResolvableSection));
        assert_eq!(*store.writes.borrow(), 0);
    }

    #[test]
    fn test_noop_rewrites_without_section() {
        let store = MemoryStore::new("root = 1\n");
        let (_, report) = run_edit(&store, &options("", "", "")).unwrap();

        assert!(report.persisted);
        assert_eq!(report.section, None);
        assert_eq!(store.text(), "root = 1\n");
    }

    #[test]
    fn test_dry_run_does_not_persist() {
        let store = MemoryStore::new("[general]\n");
        let opts = EditOptions {
            dry_run: true,
            ..options("foo=1", "", "")
        };
        let (doc, report) = run_edit(&store, &opts).unwrap();

        assert!(!report.persisted);
        assert_eq!(doc.section("general").unwrap().get("foo"), Some("1"));
        assert_eq!(store.text(), "[general]\n");
        assert_eq!(*store.writes.borrow(), 0);
    }
}
