//! In-memory record structures.

/// Bounded FIFO of freshly inserted record references.
pub mod arrival;
/// Bucketed grouping by category.
pub mod category_index;
/// Binary search tree keyed by name.
pub mod name_index;
/// Authoritative record store.
pub mod store;
/// Stack of deleted record copies.
pub mod undo;
