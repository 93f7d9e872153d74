//! Slicing of tiddler text into `!!!`-delimited sections.

use crate::tiddly::export::model::SectionKind;

/// Delimiter separating the sections of a tiddler.
pub const SECTION_DELIMITER: &str = "!!!";

/// Texts shorter than this many characters are not worth exporting.
const MIN_TEXT_CHARS: usize = 2;

/// Returns the slice of `text` selected by `kind`, re-prefixed with the
/// section delimiter so that it converts into a level-three header.
///
/// Returns `None` only when `text` has too few delimiters to contain the
/// section. A present but short section still yields a slice: the prefix
/// alone makes it long enough to export.
pub fn slice(text: &str, kind: SectionKind) -> Option<String> {
    let segments: Vec<&str> = text.split(SECTION_DELIMITER).collect();
    let body = match kind {
        SectionKind::Surgery => segments.get(1).map(|segment| segment.to_string()),
        SectionKind::Screening if segments.len() > 2 => {
            Some(segments[2..].join(SECTION_DELIMITER))
        }
        SectionKind::Screening => None,
    }?;
    Some(format!("{SECTION_DELIMITER}{body}"))
}

/// Whether a text is long enough to be written out.
pub fn is_substantial(text: &str) -> bool {
    text.chars().nth(MIN_TEXT_CHARS - 1).is_some()
}
