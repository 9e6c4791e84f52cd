//! Shared primitive IDs, limits, and sort keys.

use serde::{Deserialize, Serialize};

/// Furniture record identifier. Signed so non-positive input can be rejected.
pub type FurnitureId = i64;
/// Unit price in whole currency units.
pub type Price = u64;
/// Units in stock.
pub type Quantity = u32;
/// Store-wide insertion serial distinguishing re-inserts of the same id.
pub type InsertSerial = u64;

/// Maximum name length in characters.
pub const MAX_NAME_LEN: usize = 49;
/// Maximum category length in characters.
pub const MAX_CATEGORY_LEN: usize = 29;
/// Default arrival queue capacity.
pub const DEFAULT_ARRIVAL_CAPACITY: usize = 100;
/// Default category bucket count.
pub const DEFAULT_CATEGORY_BUCKETS: usize = 10;

/// Field used to reorder the primary store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Record id.
    Id,
    /// Name, byte-wise.
    Name,
    /// Category, byte-wise.
    Category,
    /// Price.
    Price,
    /// Quantity.
    Quantity,
}

impl SortKey {
    /// All keys in declaration order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Category,
        SortKey::Price,
        SortKey::Quantity,
    ];

    /// Lower-case key name as used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Price => "price",
            SortKey::Quantity => "quantity",
        }
    }

    /// Parses a key name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
    }
}

/// Identity reference to a canonical record in the primary store.
///
/// Carries the insertion serial so a reference taken before a delete never
/// resolves to a later record that reuses the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    /// Referenced record id.
    pub id: FurnitureId,
    /// Serial assigned when the record was inserted.
    pub serial: InsertSerial,
}
