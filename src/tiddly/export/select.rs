//! Row selection and output file naming.

use unicode_normalization::UnicodeNormalization;

use crate::tiddly::export::model::{SectionSpec, Tiddler};

/// Name used when a title sanitises to nothing.
pub const UNTITLED: &str = "untitled";

/// Keeps tiddlers whose tag string contains any of the configured tags.
///
/// The check is plain substring containment against the exported tag string,
/// so a filter `cat` also keeps a tiddler tagged `category`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    tags: Vec<String>,
}

impl TagFilter {
    /// Creates a filter from the accepted tags. An empty list accepts everything.
    pub fn new(tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the filter accepts every tiddler.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether `tiddler` should be exported.
    pub fn accepts(&self, tiddler: &Tiddler) -> bool {
        self.is_empty() || self.tags.iter().any(|tag| tiddler.tags.contains(tag.as_str()))
    }
}

/// Turns a title into something safe to use as a file stem.
///
/// The title is NFKD-normalised so accented letters keep their base letter,
/// everything outside ASCII letters, digits, `_`, `-` and whitespace is dropped,
/// and surrounding whitespace is trimmed.
pub fn sanitize(title: &str) -> String {
    let kept: String = title
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.trim().to_string()
}

/// Builds the output file name for a tiddler, optionally suffixed with a section.
pub fn file_name(tiddler: &Tiddler, section: Option<&SectionSpec>, ext: &str) -> String {
    let mut stem = sanitize(&tiddler.title);
    if stem.is_empty() {
        stem = UNTITLED.to_string();
    }
    match section {
        Some(section) => format!("{stem}_{}.{ext}", section.name),
        None => format!("{stem}.{ext}"),
    }
}
