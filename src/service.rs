//! The inventory service: one owner for all five record structures.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    core::{
        arrival::{ArrivalQueue, QueueFull},
        category_index::CategoryIndex,
        name_index::NameIndex,
        store::{PrimaryStore, StoreError},
        undo::UndoStack,
    },
    record::{FurnitureRecord, FurnitureUpdate, InvalidField},
    types::{
        DEFAULT_ARRIVAL_CAPACITY, DEFAULT_CATEGORY_BUCKETS, FurnitureId, RecordRef, SortKey,
    },
};

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Lookup by id.
    Id(FurnitureId),
    /// Lookup by name.
    Name(String),
    /// Lookup by category.
    Category(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "record {id}"),
            Lookup::Name(name) => write!(f, "name {name:?}"),
            Lookup::Category(category) => write!(f, "category {category:?}"),
        }
    }
}

/// Failures surfaced by [`Inventory`] operations. None leave partial state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Ids must be positive.
    #[error("invalid id {0}: ids must be positive")]
    InvalidId(FurnitureId),
    /// A live record already uses this id.
    #[error("record {0} already exists")]
    DuplicateId(FurnitureId),
    /// Nothing matched the lookup.
    #[error("{0} not found")]
    NotFound(Lookup),
    /// The undo stack is empty.
    #[error("nothing to undo")]
    EmptyUndo,
    /// A text field was rejected.
    #[error(transparent)]
    InvalidField(#[from] InvalidField),
}

impl From<StoreError> for InventoryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateId(id) => Self::DuplicateId(id),
            StoreError::NotFound(id) => Self::NotFound(Lookup::Id(id)),
        }
    }
}

/// Sizing knobs for the auxiliary structures.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Arrival queue capacity; arrivals past it are dropped.
    pub arrival_capacity: usize,
    /// Category index bucket count.
    pub category_buckets: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            arrival_capacity: DEFAULT_ARRIVAL_CAPACITY,
            category_buckets: DEFAULT_CATEGORY_BUCKETS,
        }
    }
}

/// A dequeued arrival and the record it still points at, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    /// Identity reference taken at insertion.
    pub reference: RecordRef,
    /// Current canonical record; `None` once that insertion was deleted.
    pub record: Option<FurnitureRecord>,
}

/// Serializable image of the store order and the undo stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshotV1 {
    /// Live records in store order.
    pub records: Vec<FurnitureRecord>,
    /// Undo stack, oldest first.
    pub undo: Vec<FurnitureRecord>,
}

/// Owns the primary store and keeps the name index, category index,
/// arrival queue, and undo stack in step with it.
///
/// The indexes hold copies taken at insertion. Deletes and updates do not
/// reach them, so lookups through them can return stale values until
/// [`Inventory::rebuild_indexes`] is called.
#[derive(Debug)]
pub struct Inventory {
    store: PrimaryStore,
    names: NameIndex,
    categories: CategoryIndex,
    arrivals: ArrivalQueue,
    undo: UndoStack,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Creates an empty inventory with default sizing.
    pub fn new() -> Self {
        Self::with_config(&InventoryConfig::default())
    }

    /// Creates an empty inventory sized by `config`.
    pub fn with_config(config: &InventoryConfig) -> Self {
        Self {
            store: PrimaryStore::new(),
            names: NameIndex::new(),
            categories: CategoryIndex::with_buckets(config.category_buckets),
            arrivals: ArrivalQueue::with_capacity(config.arrival_capacity),
            undo: UndoStack::new(),
        }
    }

    /// Rebuilds an inventory from a snapshot, repopulating every index and
    /// the arrival queue through the regular insert path. Undo copies get the
    /// same id and field checks before they are stacked.
    pub fn from_snapshot(
        snapshot: InventorySnapshotV1,
        config: &InventoryConfig,
    ) -> Result<Self, InventoryError> {
        let mut inventory = Self::with_config(config);
        // Front insertion reverses order, so replay oldest first.
        for record in snapshot.records.into_iter().rev() {
            inventory.add_record(record)?;
        }
        // Undo copies bypass `add_record` when restored, so check them here.
        for record in snapshot.undo {
            if record.id <= 0 {
                return Err(InventoryError::InvalidId(record.id));
            }
            record.validate_fields()?;
            inventory.undo.push(record);
        }
        Ok(inventory)
    }

    /// Captures store order and the undo stack.
    pub fn export_snapshot(&self) -> InventorySnapshotV1 {
        let mut undo: Vec<FurnitureRecord> = self.undo.iter().cloned().collect();
        undo.reverse();
        InventorySnapshotV1 {
            records: self.store.iter().cloned().collect(),
            undo,
        }
    }

    /// Validates and inserts a new record into every structure.
    pub fn add_record(&mut self, record: FurnitureRecord) -> Result<RecordRef, InventoryError> {
        if record.id <= 0 {
            return Err(InventoryError::InvalidId(record.id));
        }
        if self.store.contains(record.id) {
            return Err(InventoryError::DuplicateId(record.id));
        }
        record.validate_fields()?;
        self.insert_validated(record)
    }

    /// Removes a record and keeps a copy for [`Inventory::undo_last_delete`].
    pub fn delete_record(&mut self, id: FurnitureId) -> Result<FurnitureRecord, InventoryError> {
        let removed = self.store.delete(id)?;
        self.undo.push(removed.clone());
        debug!(id, undo_depth = self.undo.len(), "record deleted");
        Ok(removed)
    }

    /// Re-inserts the most recently deleted record.
    ///
    /// Fails with [`InventoryError::DuplicateId`] if the id was reused after
    /// the delete; the copy then stays on the stack.
    pub fn undo_last_delete(&mut self) -> Result<RecordRef, InventoryError> {
        let id = self.undo.peek().ok_or(InventoryError::EmptyUndo)?.id;
        if self.store.contains(id) {
            warn!(id, "undo blocked: id was reused after delete");
            return Err(InventoryError::DuplicateId(id));
        }
        let record = self.undo.pop().ok_or(InventoryError::EmptyUndo)?;
        let r = self.insert_validated(record)?;
        debug!(id, "delete undone");
        Ok(r)
    }

    /// Replaces the payload of a live record. Index copies are left as they were.
    pub fn update_record(
        &mut self,
        id: FurnitureId,
        update: &FurnitureUpdate,
    ) -> Result<(), InventoryError> {
        if !self.store.contains(id) {
            return Err(InventoryError::NotFound(Lookup::Id(id)));
        }
        update.validate_fields()?;
        self.store.update(id, update)?;
        debug!(id, "record updated");
        Ok(())
    }

    /// Canonical record with `id`.
    pub fn find(&self, id: FurnitureId) -> Result<&FurnitureRecord, InventoryError> {
        self.store
            .find(id)
            .ok_or(InventoryError::NotFound(Lookup::Id(id)))
    }

    /// Index copy for `name`, as of its insertion.
    pub fn find_by_name(&self, name: &str) -> Result<&FurnitureRecord, InventoryError> {
        self.names
            .lookup(name)
            .ok_or_else(|| InventoryError::NotFound(Lookup::Name(name.to_string())))
    }

    /// Index copies in `category`, most recent first.
    pub fn find_by_category(&self, category: &str) -> Result<Vec<&FurnitureRecord>, InventoryError> {
        let found: Vec<_> = self.categories.lookup(category).collect();
        if found.is_empty() {
            return Err(InventoryError::NotFound(Lookup::Category(category.to_string())));
        }
        Ok(found)
    }

    /// Live records in store order.
    pub fn records(&self) -> impl Iterator<Item = &FurnitureRecord> + '_ {
        self.store.iter()
    }

    /// Index copies in ascending name order.
    pub fn records_by_name(&self) -> impl Iterator<Item = &FurnitureRecord> + '_ {
        self.names.iter_in_order()
    }

    /// Reorders the store ascending by `key`. Returns the swap count.
    pub fn sort_by(&mut self, key: SortKey) -> usize {
        let swaps = self.store.sort_by(key);
        debug!(key = key.as_str(), swaps, "store sorted");
        swaps
    }

    /// Dequeues the oldest arrival and resolves it against the store.
    pub fn next_arrival(&mut self) -> Option<Arrival> {
        let reference = self.arrivals.dequeue()?;
        Some(self.resolve_arrival(reference))
    }

    /// Pending arrivals, oldest first, without dequeuing them.
    pub fn pending_arrivals(&self) -> Vec<Arrival> {
        self.arrivals
            .iter()
            .map(|reference| self.resolve_arrival(reference))
            .collect()
    }

    /// Replaces every index copy with a fresh copy of the live records.
    pub fn rebuild_indexes(&mut self) {
        self.names.clear();
        self.categories.clear();
        // Oldest first, matching the order the copies were first inserted.
        let live: Vec<FurnitureRecord> = self.store.iter().cloned().collect();
        for record in live.into_iter().rev() {
            self.names.insert(record.clone());
            self.categories.insert(record);
        }
        debug!(records = self.store.len(), "indexes rebuilt");
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when no records are live.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of deletes that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Read-only view of the primary store.
    pub fn store(&self) -> &PrimaryStore {
        &self.store
    }

    /// Read-only view of the name index.
    pub fn name_index(&self) -> &NameIndex {
        &self.names
    }

    /// Read-only view of the category index.
    pub fn category_index(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Read-only view of the arrival queue.
    pub fn arrival_queue(&self) -> &ArrivalQueue {
        &self.arrivals
    }

    /// Read-only view of the undo stack.
    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    // Order matters: store, queue, name index, category index.
    fn insert_validated(&mut self, record: FurnitureRecord) -> Result<RecordRef, InventoryError> {
        let copy = record.clone();
        let id = record.id;
        let r = self.store.insert(record)?;

        if let Err(QueueFull(dropped)) = self.arrivals.enqueue(r) {
            warn!(
                id = dropped.id,
                capacity = self.arrivals.capacity(),
                "arrival queue full; arrival dropped"
            );
        }

        self.names.insert(copy.clone());
        self.categories.insert(copy);
        debug!(id, serial = r.serial, "record inserted");
        Ok(r)
    }

    fn resolve_arrival(&self, reference: RecordRef) -> Arrival {
        Arrival {
            reference,
            record: self.store.resolve(reference).cloned(),
        }
    }
}
