use std::fs;
use std::path::Path;

use tempfile::tempdir;
use tiddly_export::ToolError;
use tiddly_export::batch::{self, ExportOptions};
use tiddly_export::io::{self, InputFormat};
use tiddly_export::model::{SectionKind, SectionSpec, Tiddler};
use tiddly_export::section;
use tiddly_export::select::{self, TagFilter};

const SURGICAL_TEXT: &str =
    "intro!!!surgery body\n''careful'' with {{{sutures}}}!!!screening part1!!!screening part2";

fn write_csv(path: &Path, rows: &[[&str; 4]]) {
    let mut writer = csv::Writer::from_path(path).expect("CSV writer");
    writer
        .write_record(["title", "text", "tags", "modified"])
        .expect("header written");
    for row in rows {
        writer.write_record(row).expect("row written");
    }
    writer.flush().expect("CSV flushed");
}

fn sample_rows() -> Vec<[&'static str; 4]> {
    vec![
        ["Knee Replacement", SURGICAL_TEXT, "ortho [[post op]]", "20240101"],
        ["Café Notes", "//hello// ```from the café```", "misc", "20240102"],
        ["Tiny", "x", "ortho", "20240103"],
    ]
}

#[test]
fn section_slices_follow_delimiter_positions() {
    let text = "intro!!!surgery body!!!screening part1!!!screening part2";
    assert_eq!(
        section::slice(text, SectionKind::Surgery).as_deref(),
        Some("!!!surgery body")
    );
    assert_eq!(
        section::slice(text, SectionKind::Screening).as_deref(),
        Some("!!!screening part1!!!screening part2")
    );
}

#[test]
fn missing_sections_yield_nothing() {
    assert_eq!(section::slice("no delimiters here", SectionKind::Surgery), None);
    assert_eq!(section::slice("intro!!!only surgery", SectionKind::Screening), None);
}

#[test]
fn short_sections_are_still_sliced() {
    assert_eq!(
        section::slice("intro!!!x!!!", SectionKind::Surgery).as_deref(),
        Some("!!!x")
    );
    assert_eq!(
        section::slice("intro!!!surgery!!!", SectionKind::Screening).as_deref(),
        Some("!!!")
    );
}

#[test]
fn one_character_section_is_exported() {
    let temp_dir = tempdir().expect("temporary directory");
    let options = ExportOptions {
        outdir: temp_dir.path().to_path_buf(),
        ..ExportOptions::default()
    }
    .with_sections(&["surgery"])
    .expect("known section");

    let tiddlers = vec![Tiddler::new("Short", "intro!!!x", "")];
    let report = batch::export_tiddlers(&tiddlers, &options).expect("batch completed");

    assert!(report.skipped.is_empty());
    let written = fs::read_to_string(temp_dir.path().join("Short_surgery.md"))
        .expect("short section written");
    assert_eq!(written, "### x");
}

#[test]
fn tag_filter_matches_substrings() {
    let tiddler = Tiddler::new("Cat", "text", "[[category one]] other");
    assert!(TagFilter::new(["cat"]).accepts(&tiddler));
    assert!(TagFilter::new(["dog", "other"]).accepts(&tiddler));
    assert!(!TagFilter::new(["dog"]).accepts(&tiddler));
    assert!(TagFilter::default().accepts(&tiddler));
}

#[test]
fn file_names_are_sanitised() {
    let spec = SectionSpec::parse("surgery").expect("known section");
    let tiddler = Tiddler::new("  Crème brûlée: v2/final?  ", "", "");
    assert_eq!(select::sanitize(&tiddler.title), "Creme brulee v2final");
    assert_eq!(
        select::file_name(&tiddler, Some(&spec), "txt"),
        "Creme brulee v2final_surgery.txt"
    );
    assert_eq!(
        select::file_name(&Tiddler::new("???", "", ""), None, "md"),
        "untitled.md"
    );
}

#[test]
fn exports_whole_tiddlers_without_sections() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tiddlers.csv");
    write_csv(&input, &sample_rows());
    let outdir = temp_dir.path().join("out");

    let options = ExportOptions {
        outdir: outdir.clone(),
        ..ExportOptions::default()
    };
    let report = batch::export_file(&input, None, &options).expect("export succeeded");

    assert_eq!(report.tiddler_count, 3);
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].title, "Tiny");
    assert!(!report.has_failures());

    let cafe = fs::read_to_string(outdir.join("Cafe Notes.md")).expect("Cafe Notes written");
    assert_eq!(cafe, "_hello_ [^1]\n[^1]: from the café");
    assert!(outdir.join("Knee Replacement.md").exists());
    assert!(!outdir.join("Tiny.md").exists());
}

#[test]
fn exports_requested_sections_of_tagged_tiddlers() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tiddlers.csv");
    write_csv(&input, &sample_rows());
    let outdir = temp_dir.path().join("out");

    let options = ExportOptions {
        outdir: outdir.clone(),
        tags: TagFilter::new(["ortho"]),
        ..ExportOptions::default()
    }
    .with_sections(&["surgery", "screening"])
    .expect("known sections");
    let report = batch::export_file(&input, None, &options).expect("export succeeded");

    assert_eq!(report.filtered_out, 1);
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.skipped.len(), 2);

    let surgery = fs::read_to_string(outdir.join("Knee Replacement_surgery.md"))
        .expect("surgery section written");
    assert_eq!(surgery, "### surgery body\n**careful** with `sutures`");

    let screening = fs::read_to_string(outdir.join("Knee Replacement_screening.md"))
        .expect("screening section written");
    assert_eq!(screening, "### screening part1!!!screening part2");

    assert!(!outdir.join("Cafe Notes_surgery.md").exists());
    assert!(!outdir.join("Tiny_surgery.md").exists());
}

#[test]
fn reads_tab_separated_exports() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tiddlers.tsv");
    fs::write(&input, "tags\ttitle\ttext\nwiki\tTab Page\t! Heading\n").expect("TSV written");

    let tiddlers = io::read_tiddlers(&input, None).expect("TSV read");
    assert_eq!(tiddlers, vec![Tiddler::new("Tab Page", "! Heading", "wiki")]);
}

#[test]
fn blank_csv_rows_are_dropped() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tiddlers.csv");
    write_csv(
        &input,
        &[
            ["Page", "some text", "wiki", "20240101"],
            ["", " ", "orphan tag", "20240102"],
        ],
    );

    let tiddlers = io::read_tiddlers(&input, None).expect("CSV read");
    assert_eq!(tiddlers, vec![Tiddler::new("Page", "some text", "wiki")]);
}

#[test]
fn reads_tiddlers_from_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tiddlers.xlsx");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in ["title", "tags", "text"].iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .expect("header cell written");
    }
    worksheet.write_string(1, 0, "Sheet Page").expect("title written");
    worksheet.write_string(1, 1, "ortho").expect("tags written");
    worksheet
        .write_string(1, 2, "!! Overview\n[[Details|details.html]]")
        .expect("text written");
    worksheet
        .write_string(2, 1, "orphan tag")
        .expect("padding row written");
    workbook.save(&input).expect("workbook saved");

    let tiddlers = io::read_tiddlers(&input, None).expect("workbook read");
    assert_eq!(
        tiddlers,
        vec![Tiddler::new(
            "Sheet Page",
            "!! Overview\n[[Details|details.html]]",
            "ortho"
        )]
    );

    let outdir = temp_dir.path().join("out");
    let options = ExportOptions {
        outdir: outdir.clone(),
        extension: "markdown".to_string(),
        ..ExportOptions::default()
    };
    batch::export_file(&input, Some(InputFormat::Xlsx), &options).expect("export succeeded");
    let written = fs::read_to_string(outdir.join("Sheet Page.markdown")).expect("page written");
    assert_eq!(written, "## Overview\n[Details](details.html)");
}

#[test]
fn write_failures_are_reported_without_aborting() {
    let temp_dir = tempdir().expect("temporary directory");
    let outdir = temp_dir.path().join("out");
    fs::create_dir_all(outdir.join("Clash.md")).expect("blocking directory created");

    let tiddlers = vec![
        Tiddler::new("Clash", "cannot be written", ""),
        Tiddler::new("Fine", "written anyway", ""),
    ];
    let options = ExportOptions {
        outdir: outdir.clone(),
        ..ExportOptions::default()
    };
    let report = batch::export_tiddlers(&tiddlers, &options).expect("batch completed");

    assert!(report.has_failures());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].title, "Clash");
    assert_eq!(report.written, vec![outdir.join("Fine.md")]);

    let report_path = temp_dir.path().join("report.json");
    report.write_json(&report_path).expect("report written");
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report read"))
            .expect("report parsed");
    assert_eq!(json["failures"][0]["title"], "Clash");
    assert_eq!(json["tiddler_count"], 2);
}

#[test]
fn existing_output_directory_is_reused() {
    let temp_dir = tempdir().expect("temporary directory");
    let options = ExportOptions {
        outdir: temp_dir.path().to_path_buf(),
        ..ExportOptions::default()
    };
    let tiddlers = vec![Tiddler::new("Again", "same text", "")];

    batch::export_tiddlers(&tiddlers, &options).expect("first run");
    let report = batch::export_tiddlers(&tiddlers, &options).expect("second run");
    assert_eq!(report.written.len(), 1);
}

#[test]
fn unknown_sections_are_rejected() {
    let error = ExportOptions::default()
        .with_sections(&["surgery", "appendix"])
        .expect_err("appendix has no policy");
    assert!(matches!(error, ToolError::UnknownSection(name) if name == "appendix"));
}

#[test]
fn missing_columns_are_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("broken.csv");
    fs::write(&input, "title,text\nPage,body\n").expect("CSV written");

    let error = batch::export_file(&input, None, &ExportOptions::default())
        .expect_err("tags column missing");
    assert!(matches!(error, ToolError::MissingColumn(name) if name == "tags"));
}

#[test]
fn missing_input_is_fatal() {
    let temp_dir = tempdir().expect("temporary directory");
    let error = io::read_tiddlers(&temp_dir.path().join("absent.csv"), None)
        .expect_err("input missing");
    assert!(matches!(error, ToolError::MissingInput(_)));
}
