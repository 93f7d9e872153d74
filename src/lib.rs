//! Core library for the tiddly-export command line application.
//!
//! The library turns a tabular export of TiddlyWiki tiddlers into one
//! Markdown file per tiddler or per tiddler section. Table readers live under
//! [`tiddly::export::io`], the wiki-to-Markdown conversion in
//! [`tiddly::export::markup`], section slicing in [`tiddly::export::section`],
//! tag filtering and file naming in [`tiddly::export::select`], and the export
//! loop under [`tiddly::export::batch`].

pub mod tiddly;

pub use tiddly::export::{
    Result, ToolError, batch, error, io, logging, markup, model, report, section, select,
};
