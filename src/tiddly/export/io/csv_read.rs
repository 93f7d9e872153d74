use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, instrument};

use crate::tiddly::export::error::Result;
use crate::tiddly::export::io::ColumnIndex;
use crate::tiddly::export::model::Tiddler;

/// Reads tiddlers from a delimited export with a header row.
///
/// Header names are matched after trimming; columns other than `title`,
/// `text` and `tags` are ignored. Short rows are tolerated and their missing
/// fields read as empty strings. Blank rows are skipped.
#[instrument(
    level = "debug",
    skip_all,
    fields(path = %path.display(), delimiter = %char::from(delimiter).escape_default())
)]
pub fn read_tiddlers(path: &Path, delimiter: u8) -> Result<Vec<Tiddler>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(BufReader::new(file));

    ColumnIndex::locate(reader.headers()?)?;

    let mut tiddlers = Vec::new();
    for row in reader.deserialize::<Tiddler>() {
        let tiddler = row?;
        if !tiddler.is_blank() {
            tiddlers.push(tiddler);
        }
    }
    debug!(tiddler_count = tiddlers.len(), "read tiddlers from delimited export");
    Ok(tiddlers)
}
