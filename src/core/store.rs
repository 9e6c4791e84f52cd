use std::collections::VecDeque;

use hashbrown::HashMap;
use thiserror::Error;

use crate::{
    record::{FurnitureRecord, FurnitureUpdate},
    types::{FurnitureId, InsertSerial, RecordRef, SortKey},
};

/// Failures raised by [`PrimaryStore`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A live record already uses this id.
    #[error("record {0} already exists")]
    DuplicateId(FurnitureId),
    /// No live record has this id.
    #[error("record {0} not found")]
    NotFound(FurnitureId),
}

#[derive(Debug, Clone)]
struct Slot {
    record: FurnitureRecord,
    serial: InsertSerial,
}

/// Authoritative owner of every live record, in most-recent-first order.
#[derive(Debug, Default)]
pub struct PrimaryStore {
    records: HashMap<FurnitureId, Slot>,
    order: VecDeque<FurnitureId>,
    next_serial: InsertSerial,
}

impl PrimaryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            next_serial: 1,
            ..Self::default()
        }
    }

    /// Takes ownership of `record` and places it at the front of the order.
    pub fn insert(&mut self, record: FurnitureRecord) -> Result<RecordRef, StoreError> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        let id = record.id;
        let serial = self.take_next_serial();
        self.order.push_front(id);
        self.records.insert(id, Slot { record, serial });
        Ok(RecordRef { id, serial })
    }

    /// Removes the record with `id` and hands it back.
    pub fn delete(&mut self, id: FurnitureId) -> Result<FurnitureRecord, StoreError> {
        let slot = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(pos) = self.order.iter().position(|x| *x == id) {
            self.order.remove(pos);
        }
        Ok(slot.record)
    }

    /// Overwrites the mutable fields of the record with `id` in place.
    pub fn update(&mut self, id: FurnitureId, update: &FurnitureUpdate) -> Result<(), StoreError> {
        let slot = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        update.apply_to(&mut slot.record);
        Ok(())
    }

    /// Canonical record with `id`.
    pub fn find(&self, id: FurnitureId) -> Option<&FurnitureRecord> {
        self.records.get(&id).map(|slot| &slot.record)
    }

    /// True when a live record has `id`.
    pub fn contains(&self, id: FurnitureId) -> bool {
        self.records.contains_key(&id)
    }

    /// Identity reference for the live record with `id`.
    pub fn record_ref(&self, id: FurnitureId) -> Option<RecordRef> {
        self.records.get(&id).map(|slot| RecordRef {
            id,
            serial: slot.serial,
        })
    }

    /// Follows an identity reference. Returns `None` once the referenced
    /// insertion has been deleted, even if the id was reused since.
    pub fn resolve(&self, r: RecordRef) -> Option<&FurnitureRecord> {
        self.records
            .get(&r.id)
            .filter(|slot| slot.serial == r.serial)
            .map(|slot| &slot.record)
    }

    /// Stable ascending reorder by `key` using adjacent compare-and-swap
    /// passes. Returns the number of swaps performed.
    pub fn sort_by(&mut self, key: SortKey) -> usize {
        let mut swaps = 0;
        let mut unsorted = self.order.len();

        // Everything at or past the last swap of a pass is already in place.
        while unsorted > 1 {
            let mut last_swap = 0;
            for i in 1..unsorted {
                if self.out_of_order(self.order[i - 1], self.order[i], key) {
                    self.order.swap(i - 1, i);
                    last_swap = i;
                    swaps += 1;
                }
            }
            unsorted = last_swap;
        }

        swaps
    }

    /// Records in current store order. Restartable: call again for a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = &FurnitureRecord> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|slot| &slot.record))
    }

    /// Ids in current store order.
    pub fn ordered_ids(&self) -> Vec<FurnitureId> {
        self.order.iter().copied().collect()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn out_of_order(&self, a: FurnitureId, b: FurnitureId, key: SortKey) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(a), Some(b)) => a.cmp_by(b, key).is_gt(),
            _ => false,
        }
    }

    fn take_next_serial(&mut self) -> InsertSerial {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }
}
