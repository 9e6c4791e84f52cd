//! In-memory furniture inventory with name and category indexes, an
//! arrival queue, and undoable deletes.
//!
//! [`service::Inventory`] owns five structures over the same record set:
//! the authoritative [`core::store::PrimaryStore`], a name-keyed binary
//! search tree, a bucketed category grouping, a bounded arrival queue, and a
//! stack of deleted records. The two indexes keep copies taken at insert
//! time, so updates and deletes only show up in them after
//! [`service::Inventory::rebuild_indexes`].
//!
//! # Examples
//!
//! ```
//! use furnstock::{record::FurnitureRecord, service::Inventory, types::SortKey};
//!
//! let mut inventory = Inventory::new();
//! inventory.add_record(FurnitureRecord::new(1, "Oak Table", "Tables", 300, 2)).expect("add");
//! inventory.add_record(FurnitureRecord::new(2, "Desk Lamp", "Lighting", 40, 10)).expect("add");
//!
//! assert_eq!(inventory.find_by_name("Oak Table").expect("lookup").id, 1);
//!
//! inventory.delete_record(1).expect("delete");
//! inventory.undo_last_delete().expect("undo");
//! assert_eq!(inventory.find(1).expect("restored").price, 300);
//!
//! inventory.sort_by(SortKey::Price);
//! let ids: Vec<i64> = inventory.records().map(|r| r.id).collect();
//! assert_eq!(ids, vec![2, 1]);
//! ```
//!
//! Saving to and loading from a seed file:
//! ```no_run
//! use furnstock::{persist::text, service::Inventory};
//!
//! let mut inventory = Inventory::new();
//! let report = text::load_file("furniture.txt", &mut inventory).expect("load");
//! println!("loaded {} records", report.loaded);
//! text::save_file("furniture.txt", &inventory).expect("save");
//! ```
#![deny(missing_docs)]

/// Record structures: store, indexes, queue, undo stack.
pub mod core;
/// Seed files and SQLite snapshots.
pub mod persist;
/// Furniture records and updates.
pub mod record;
/// Orchestration of the record structures.
pub mod service;
/// Command parsing and execution for the interactive shell.
pub mod shell;
/// Shared primitive types and limits.
pub mod types;
