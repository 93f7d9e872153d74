use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use tiddly_export::batch::{self, DEFAULT_EXTENSION, DEFAULT_OUTDIR, ExportOptions};
use tiddly_export::io::InputFormat;
use tiddly_export::select::TagFilter;
use tiddly_export::{Result, logging};
use tracing::warn;

/// Exit status when the run finished but some files could not be written.
const PARTIAL_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    logging::init(cli.verbose)?;

    let options = ExportOptions {
        extension: cli.ext,
        outdir: cli.outdir,
        tags: TagFilter::new(cli.tags),
        sections: Vec::new(),
    }
    .with_sections(cli.sections.as_slice())?;

    let report = batch::export_file(&cli.input, cli.format.map(InputFormat::from), &options)?;
    if let Some(path) = &cli.report {
        report.write_json(path)?;
    }

    if report.has_failures() {
        for failure in &report.failures {
            warn!(file = %failure.file.display(), error = %failure.error, "not exported");
        }
        return Ok(ExitCode::from(PARTIAL_FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert TiddlyWiki tiddlers exported as CSV or XLSX to individual Markdown files."
)]
struct Cli {
    /// Exported tiddler table.
    input: PathBuf,

    /// File extension of the generated files.
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    ext: String,

    /// Output folder.
    #[arg(short, long, default_value = DEFAULT_OUTDIR)]
    outdir: PathBuf,

    /// Tag to export; may be repeated, a tiddler matching any of them is kept.
    #[arg(short, long)]
    tags: Vec<String>,

    /// Section to extract into its own file; may be repeated.
    #[arg(short, long)]
    sections: Vec<String>,

    /// Format of the input table. Inferred from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<TableFormat>,

    /// Write a JSON summary of the export to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase log verbosity; may be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TableFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl From<TableFormat> for InputFormat {
    fn from(format: TableFormat) -> Self {
        match format {
            TableFormat::Csv => InputFormat::Csv,
            TableFormat::Tsv => InputFormat::Tsv,
            TableFormat::Xlsx => InputFormat::Xlsx,
        }
    }
}
