use crate::record::FurnitureRecord;

/// Unbounded LIFO of record copies taken at deletion time.
#[derive(Debug, Default, Clone)]
pub struct UndoStack {
    deleted: Vec<FurnitureRecord>,
}

impl UndoStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a deleted record.
    pub fn push(&mut self, record: FurnitureRecord) {
        self.deleted.push(record);
    }

    /// Removes the most recently deleted record.
    pub fn pop(&mut self) -> Option<FurnitureRecord> {
        self.deleted.pop()
    }

    /// Most recently deleted record, left in place.
    pub fn peek(&self) -> Option<&FurnitureRecord> {
        self.deleted.last()
    }

    /// Deleted records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &FurnitureRecord> + '_ {
        self.deleted.iter().rev()
    }

    /// Number of restorable records.
    pub fn len(&self) -> usize {
        self.deleted.len()
    }

    /// True when there is nothing to undo.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty()
    }
}
