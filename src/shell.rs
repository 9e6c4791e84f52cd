//! Line-oriented command language over an [`Inventory`].
//!
//! Parsing turns raw text into typed commands and execution turns results
//! into printable lines. Neither touches the record structures directly.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    persist::{
        PersistError,
        text::{self, MalformedRecord},
    },
    record::{FurnitureRecord, FurnitureUpdate},
    service::{Arrival, Inventory, InventoryError},
    types::{FurnitureId, SortKey},
};

/// Command summary printed by `help`.
pub const HELP: &str = "\
add <id>|<name>|<category>|<price>|<qty>     add a record
update <id>|<name>|<category>|<price>|<qty>  replace a record's fields
delete <id>                                  delete a record
undo                                         restore the last deleted record
find <id>                                    show a record by id
name <name>                                  look a record up by name
category <category>                          list records in a category
list                                         list records in store order
names                                        list records by name
sort <id|name|category|price|quantity>       reorder the store
next                                         take the oldest arrival
pending                                      show pending arrivals
rebuild                                      refresh name and category indexes
load <path>                                  add records from a seed file
save <path>                                  write records to a seed file
help                                         show this text
quit                                         leave";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a record.
    Add(FurnitureRecord),
    /// Replace a record's mutable fields.
    Update(FurnitureId, FurnitureUpdate),
    /// Delete by id.
    Delete(FurnitureId),
    /// Undo the last delete.
    Undo,
    /// Show a record by id.
    Find(FurnitureId),
    /// Look up by name.
    Name(String),
    /// List a category.
    Category(String),
    /// List in store order.
    List,
    /// List in name order.
    Names,
    /// Sort the store.
    Sort(SortKey),
    /// Dequeue an arrival.
    Next,
    /// Show pending arrivals.
    Pending,
    /// Rebuild the indexes.
    Rebuild,
    /// Load a seed file.
    Load(PathBuf),
    /// Save a seed file.
    Save(PathBuf),
    /// Show help.
    Help,
    /// Leave the shell.
    Quit,
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Lines to print.
    Lines(Vec<String>),
    /// The shell should stop.
    Quit,
}

/// Failures surfaced to the shell user.
#[derive(Debug, Error)]
pub enum ShellError {
    /// First word is not a command.
    #[error("unknown command {0:?}; try `help`")]
    UnknownCommand(String),
    /// Missing or bad argument.
    #[error("usage: {0}")]
    Usage(&'static str),
    /// Record fields did not parse.
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),
    /// The inventory refused the operation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    /// Loading or saving failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "add" => Command::Add(text::parse_line(rest)?),
            "update" => {
                let rec = text::parse_line(rest)?;
                let update = FurnitureUpdate::capture_from(&rec);
                Command::Update(rec.id, update)
            }
            "delete" | "del" => Command::Delete(parse_id(rest, "delete <id>")?),
            "undo" => Command::Undo,
            "find" => Command::Find(parse_id(rest, "find <id>")?),
            "name" => Command::Name(non_empty(rest, "name <name>")?),
            "category" | "cat" => Command::Category(non_empty(rest, "category <category>")?),
            "list" | "ls" => Command::List,
            "names" => Command::Names,
            "sort" => Command::Sort(
                SortKey::parse(rest).ok_or(ShellError::Usage(
                    "sort <id|name|category|price|quantity>",
                ))?,
            ),
            "next" => Command::Next,
            "pending" => Command::Pending,
            "rebuild" => Command::Rebuild,
            "load" => Command::Load(non_empty(rest, "load <path>")?.into()),
            "save" => Command::Save(non_empty(rest, "save <path>")?.into()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ShellError::UnknownCommand(word.to_string())),
        };
        Ok(cmd)
    }
}

/// Runs `cmd` against `inventory`.
pub fn execute(inventory: &mut Inventory, cmd: Command) -> Result<Outcome, ShellError> {
    let lines = match cmd {
        Command::Add(rec) => {
            let r = inventory.add_record(rec)?;
            vec![format!("added record {}", r.id)]
        }
        Command::Update(id, update) => {
            inventory.update_record(id, &update)?;
            vec![format!("updated record {id}")]
        }
        Command::Delete(id) => {
            let removed = inventory.delete_record(id)?;
            vec![format!("deleted {}", format_record(&removed))]
        }
        Command::Undo => {
            let r = inventory.undo_last_delete()?;
            vec![format!("restored record {}", r.id)]
        }
        Command::Find(id) => vec![format_record(inventory.find(id)?)],
        Command::Name(name) => vec![format_record(inventory.find_by_name(&name)?)],
        Command::Category(category) => inventory
            .find_by_category(&category)?
            .into_iter()
            .map(format_record)
            .collect(),
        Command::List => listing(inventory.records()),
        Command::Names => listing(inventory.records_by_name()),
        Command::Sort(key) => {
            inventory.sort_by(key);
            vec![format!("sorted by {}", key.as_str())]
        }
        Command::Next => match inventory.next_arrival() {
            Some(arrival) => vec![format_arrival(&arrival)],
            None => vec!["no pending arrivals".to_string()],
        },
        Command::Pending => {
            let pending = inventory.pending_arrivals();
            if pending.is_empty() {
                vec!["no pending arrivals".to_string()]
            } else {
                pending.iter().map(format_arrival).collect()
            }
        }
        Command::Rebuild => {
            inventory.rebuild_indexes();
            vec!["indexes rebuilt".to_string()]
        }
        Command::Load(path) => {
            let report = text::load_file(&path, inventory)?;
            vec![format!(
                "loaded {} records, skipped {}",
                report.loaded,
                report.skipped()
            )]
        }
        Command::Save(path) => {
            let written = text::save_file(&path, inventory)?;
            vec![format!("saved {written} records to {}", path.display())]
        }
        Command::Help => HELP.lines().map(str::to_string).collect(),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Lines(lines))
}

/// One-line rendering of a record.
pub fn format_record(rec: &FurnitureRecord) -> String {
    format!(
        "#{} {} [{}] price={} qty={}",
        rec.id, rec.name, rec.category, rec.price, rec.quantity
    )
}

fn format_arrival(arrival: &Arrival) -> String {
    match &arrival.record {
        Some(rec) => format!("arrival {}", format_record(rec)),
        None => format!("arrival #{} (deleted)", arrival.reference.id),
    }
}

fn listing<'a>(records: impl Iterator<Item = &'a FurnitureRecord>) -> Vec<String> {
    let lines: Vec<String> = records.map(format_record).collect();
    if lines.is_empty() {
        return vec!["inventory is empty".to_string()];
    }
    lines
}

fn parse_id(raw: &str, usage: &'static str) -> Result<FurnitureId, ShellError> {
    raw.trim().parse().map_err(|_| ShellError::Usage(usage))
}

fn non_empty(raw: &str, usage: &'static str) -> Result<String, ShellError> {
    if raw.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    Ok(raw.to_string())
}
