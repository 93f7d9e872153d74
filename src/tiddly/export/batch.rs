use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::tiddly::export::error::Result;
use crate::tiddly::export::io::{self, InputFormat};
use crate::tiddly::export::markup;
use crate::tiddly::export::model::{SectionSpec, Tiddler};
use crate::tiddly::export::report::{ExportReport, FailedUnit, SkippedUnit};
use crate::tiddly::export::section;
use crate::tiddly::export::select::{self, TagFilter};

/// Default extension of the generated files.
pub const DEFAULT_EXTENSION: &str = "md";
/// Default directory the generated files are written to.
pub const DEFAULT_OUTDIR: &str = "output";

/// Settings controlling which tiddlers are exported and where they go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Extension appended to every generated file name, without the dot.
    pub extension: String,
    /// Directory receiving the generated files. Created when missing.
    pub outdir: PathBuf,
    /// Tags a tiddler must match one of to be exported.
    pub tags: TagFilter,
    /// Sections to export per tiddler. Empty means one file with the whole text.
    pub sections: Vec<SectionSpec>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            outdir: PathBuf::from(DEFAULT_OUTDIR),
            tags: TagFilter::default(),
            sections: Vec::new(),
        }
    }
}

impl ExportOptions {
    /// Replaces the section list, rejecting names without a slicing policy.
    pub fn with_sections<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        self.sections = names
            .iter()
            .map(|name| SectionSpec::parse(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }
}

/// Reads a tiddler export and writes one Markdown file per selected unit.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), outdir = %options.outdir.display())
)]
pub fn export_file(
    input: &Path,
    format: Option<InputFormat>,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let tiddlers = io::read_tiddlers(input, format)?;
    info!(tiddler_count = tiddlers.len(), "read tiddlers from export");
    export_tiddlers(&tiddlers, options)
}

/// Writes the selected tiddlers into `options.outdir`.
///
/// Only setting up the output directory can fail the whole run. A unit whose
/// file cannot be written is recorded in the report and the run continues.
#[instrument(level = "debug", skip_all, fields(outdir = %options.outdir.display()))]
pub fn export_tiddlers(tiddlers: &[Tiddler], options: &ExportOptions) -> Result<ExportReport> {
    fs::create_dir_all(&options.outdir)?;

    let mut report = ExportReport {
        tiddler_count: tiddlers.len(),
        ..ExportReport::default()
    };

    for tiddler in tiddlers {
        if !options.tags.accepts(tiddler) {
            report.filtered_out += 1;
            continue;
        }
        if options.sections.is_empty() {
            export_unit(tiddler, None, options, &mut report);
        } else {
            for spec in &options.sections {
                export_unit(tiddler, Some(spec), options, &mut report);
            }
        }
    }

    if report.has_failures() {
        warn!(
            failed = report.failures.len(),
            written = report.written.len(),
            "some tiddlers could not be exported"
        );
    } else {
        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            filtered_out = report.filtered_out,
            "export finished"
        );
    }
    Ok(report)
}

fn export_unit(
    tiddler: &Tiddler,
    spec: Option<&SectionSpec>,
    options: &ExportOptions,
    report: &mut ExportReport,
) {
    let section_name = spec.map(|spec| spec.name.clone());
    let Some(text) = unit_text(tiddler, spec) else {
        debug!(title = %tiddler.title, section = ?section_name, "nothing to export");
        report.skipped.push(SkippedUnit {
            title: tiddler.title.clone(),
            section: section_name,
        });
        return;
    };

    let path = options
        .outdir
        .join(select::file_name(tiddler, spec, &options.extension));
    match fs::write(&path, markup::transform(&text)) {
        Ok(()) => {
            info!(file = %path.display(), "wrote tiddler");
            report.written.push(path);
        }
        Err(error) => {
            warn!(file = %path.display(), %error, "failed to write tiddler");
            report.failures.push(FailedUnit {
                title: tiddler.title.clone(),
                section: section_name,
                file: path,
                error: error.to_string(),
            });
        }
    }
}

fn unit_text<'a>(tiddler: &'a Tiddler, spec: Option<&SectionSpec>) -> Option<Cow<'a, str>> {
    match spec {
        Some(spec) => section::slice(&tiddler.text, spec.kind).map(Cow::Owned),
        None => section::is_substantial(&tiddler.text)
            .then_some(Cow::Borrowed(tiddler.text.as_str())),
    }
}
