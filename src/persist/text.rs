//! Plain-text seed files: one `id|name|category|price|quantity` line per record.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    record::FurnitureRecord,
    service::{Inventory, InventoryConfig},
};

use super::{LoadReport, PersistResult, SnapshotStore};

/// Field separator.
pub const SEPARATOR: char = '|';

/// A seed line that does not describe a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    /// Wrong number of `|`-separated fields.
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),
    /// A numeric field did not parse.
    #[error("bad {field} value {value:?}")]
    BadNumber {
        /// Field name.
        field: &'static str,
        /// Raw text.
        value: String,
    },
}

/// Parses one seed line. Text fields are taken verbatim; numbers may carry
/// surrounding whitespace.
pub fn parse_line(line: &str) -> Result<FurnitureRecord, MalformedRecord> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let [id, name, category, price, quantity] = fields.as_slice() else {
        return Err(MalformedRecord::FieldCount(fields.len()));
    };

    Ok(FurnitureRecord {
        id: parse_number("id", id)?,
        name: (*name).to_string(),
        category: (*category).to_string(),
        price: parse_number("price", price)?,
        quantity: parse_number("quantity", quantity)?,
    })
}

/// Formats one seed line, without the trailing newline.
pub fn format_line(rec: &FurnitureRecord) -> String {
    format!(
        "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
        rec.id, rec.name, rec.category, rec.price, rec.quantity
    )
}

/// Writes one line per record. Returns the number written.
pub fn write_records<'a, W: Write>(
    mut writer: W,
    records: impl IntoIterator<Item = &'a FurnitureRecord>,
) -> std::io::Result<usize> {
    let mut written = 0;
    for rec in records {
        writeln!(writer, "{}", format_line(rec))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Adds every well-formed line to `inventory` through the regular insert
/// path. Blank lines are ignored; bad lines are counted and skipped.
pub fn load_from_reader<R: BufRead>(reader: R, inventory: &mut Inventory) -> PersistResult<LoadReport> {
    let mut report = LoadReport::default();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match parse_line(&line) {
            Ok(record) => record,
            Err(err) => {
                warn!(line = lineno + 1, %err, "skipping malformed seed line");
                report.malformed += 1;
                continue;
            }
        };

        match inventory.add_record(record) {
            Ok(_) => report.loaded += 1,
            Err(err) => {
                warn!(line = lineno + 1, %err, "skipping rejected seed record");
                report.rejected += 1;
            }
        }
    }
    Ok(report)
}

/// Loads a seed file into `inventory`.
pub fn load_file(path: impl AsRef<Path>, inventory: &mut Inventory) -> PersistResult<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let report = load_from_reader(BufReader::new(file), inventory)?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped(),
        "seed file loaded"
    );
    Ok(report)
}

/// Writes every live record to `path`, replacing its contents.
///
/// Lines go out oldest first, so loading the file back reproduces the
/// current store order.
pub fn save_file(path: impl AsRef<Path>, inventory: &Inventory) -> PersistResult<usize> {
    let path = path.as_ref();
    let records: Vec<&FurnitureRecord> = inventory.records().collect();
    let file = File::create(path)?;
    let written = write_records(BufWriter::new(file), records.into_iter().rev())?;
    info!(path = %path.display(), records = written, "seed file saved");
    Ok(written)
}

/// [`SnapshotStore`] over a seed file. Only live records are kept; the undo
/// stack is not part of the format.
#[derive(Debug, Clone)]
pub struct SeedFile {
    path: PathBuf,
}

impl SeedFile {
    /// Seed file at `path`. Nothing is touched until load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for SeedFile {
    fn load(&self, config: &InventoryConfig) -> PersistResult<(Inventory, LoadReport)> {
        let mut inventory = Inventory::with_config(config);
        if !self.path.exists() {
            return Ok((inventory, LoadReport::default()));
        }
        let report = load_file(&self.path, &mut inventory)?;
        Ok((inventory, report))
    }

    fn save(&mut self, inventory: &Inventory) -> PersistResult<()> {
        save_file(&self.path, inventory)?;
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, MalformedRecord> {
    raw.trim().parse().map_err(|_| MalformedRecord::BadNumber {
        field,
        value: raw.to_string(),
    })
}
