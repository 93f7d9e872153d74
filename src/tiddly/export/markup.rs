//! Wiki markup to Markdown conversion.
//!
//! The conversion is line oriented: every line goes through a fixed sequence
//! of regex substitutions, and the only state carried between lines is the
//! list of footnotes extracted so far. Unbalanced delimiters never match and
//! are copied through untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Leading `!` run, one optional whitespace, then anything but `[`.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(!+)(\s?)([^\[])").unwrap());

/// `__underlined__`
static UNDERLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.*?)__").unwrap());

/// `''bold''`
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"''(.*?)''").unwrap());

/// `//italic//`
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//(.*?)//").unwrap());

/// `[[Page]]` with a word-only target.
static BARE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[(\w+?)\]\]").unwrap());

/// `[[Label|Target]]`
static PIPED_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\|(.*?)\]\]").unwrap());

/// `{{{code}}}`
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{\{(.*?)\}\}\}").unwrap());

/// ```` ```footnote``` ````
static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```(.*?)```").unwrap());

const FOOTNOTE_FENCE: usize = "```".len();

/// Converts wiki markup into Markdown.
///
/// Each line is rewritten independently in this order: headers, underline,
/// bold, italics, bare links, piped links, inline code and finally footnote
/// extraction. Extracted footnotes are numbered from 1 in order of appearance
/// and their definitions are appended after the last line.
///
/// ```
/// use tiddly_export::markup::transform;
///
/// assert_eq!(transform("!! Title"), "## Title");
/// assert_eq!(transform("a ```note``` b"), "a [^1] b\n[^1]: note");
/// ```
pub fn transform(text: &str) -> String {
    let mut footnotes = Footnotes::default();
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| footnotes.extract(&convert_inline(line)))
        .collect();
    lines.extend(footnotes.definitions());
    lines.join("\n")
}

fn convert_inline(line: &str) -> String {
    let line = convert_header(line);
    let line = UNDERLINE_RE.replace_all(&line, "${1}").into_owned();
    let line = BOLD_RE.replace_all(&line, "**${1}**").into_owned();
    let line = ITALIC_RE.replace_all(&line, "_${1}_").into_owned();
    let line = BARE_LINK_RE.replace_all(&line, "${1}").into_owned();
    let line = PIPED_LINK_RE.replace_all(&line, "[${1}](${2})").into_owned();
    CODE_RE.replace_all(&line, "`${1}`").into_owned()
}

fn convert_header(line: &str) -> String {
    HEADER_RE
        .replace(line, |caps: &Captures<'_>| {
            format!("{} {}", "#".repeat(caps[1].len()), &caps[3])
        })
        .into_owned()
}

/// Footnote bodies collected during a single [`transform`] call.
#[derive(Debug, Default)]
struct Footnotes {
    bodies: Vec<String>,
}

impl Footnotes {
    /// Replaces the first footnote span of `line` with its `[^n]` marker.
    fn extract(&mut self, line: &str) -> String {
        let Some(span) = FOOTNOTE_RE.find(line) else {
            return line.to_string();
        };
        let body = &line[span.start() + FOOTNOTE_FENCE..span.end() - FOOTNOTE_FENCE];
        self.bodies.push(body.to_string());
        format!(
            "{}[^{}]{}",
            &line[..span.start()],
            self.bodies.len(),
            &line[span.end()..]
        )
    }

    fn definitions(&self) -> impl Iterator<Item = String> + '_ {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| format!("[^{}]: {}", index + 1, body))
    }
}
