use serde::Deserialize;

use crate::tiddly::export::error::{Result, ToolError};

/// Name of the column holding the tiddler title.
pub const TITLE_COLUMN: &str = "title";
/// Name of the column holding the raw wiki markup.
pub const TEXT_COLUMN: &str = "text";
/// Name of the column holding the free-form tag string.
pub const TAGS_COLUMN: &str = "tags";

/// A single exported wiki record.
///
/// Tags are kept exactly as exported. TiddlyWiki writes them as one string
/// (`[[multi word]] single`), and filtering only ever performs substring
/// checks against that string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Tiddler {
    /// Title used to derive the output file name.
    #[serde(default)]
    pub title: String,
    /// Raw wiki markup.
    #[serde(default)]
    pub text: String,
    /// Exported tag string.
    #[serde(default)]
    pub tags: String,
}

impl Tiddler {
    /// Creates a tiddler from its three exported fields.
    pub fn new(title: impl Into<String>, text: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            tags: tags.into(),
        }
    }

    /// Whether the row carries neither a title nor any text, as spreadsheet
    /// padding rows do. Readers drop such rows.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.text.trim().is_empty()
    }
}

/// Slicing policy applied to a tiddler's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Second `!!!`-delimited segment.
    Surgery,
    /// Every segment from the third onward.
    Screening,
}

impl SectionKind {
    /// Resolves the policy for a user-supplied section name.
    ///
    /// Matching is by substring, so `post-surgery` selects [`SectionKind::Surgery`].
    /// `surgery` is checked before `screening`.
    pub fn for_name(name: &str) -> Option<Self> {
        if name.contains("surgery") {
            Some(SectionKind::Surgery)
        } else if name.contains("screening") {
            Some(SectionKind::Screening)
        } else {
            None
        }
    }
}

/// A requested section: the name as given by the user and the policy it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    /// Name used verbatim as the output file suffix.
    pub name: String,
    /// Slicing policy.
    pub kind: SectionKind,
}

impl SectionSpec {
    /// Validates a section name, rejecting names with no slicing policy.
    pub fn parse(name: &str) -> Result<Self> {
        let kind =
            SectionKind::for_name(name).ok_or_else(|| ToolError::UnknownSection(name.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            kind,
        })
    }
}
