//! Fixed-bucket hash grouping of record copies, keyed by category.
//!
//! The bucket of a category is the sum of its bytes modulo the bucket count.
//! The formula is kept simple so that bucket placement is reproducible
//! across runs and seed files; lookups filter on exact category equality, so
//! categories sharing a bucket never leak into each other's results.

use crate::{record::FurnitureRecord, types::DEFAULT_CATEGORY_BUCKETS};

/// Category-keyed grouping holding independent record copies.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    // Each chain is stored oldest-first; reads walk it backwards.
    buckets: Vec<Vec<FurnitureRecord>>,
}

impl Default for CategoryIndex {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_CATEGORY_BUCKETS)
    }
}

impl CategoryIndex {
    /// Creates an index with the default ten buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index with `count` buckets (at least one).
    pub fn with_buckets(count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); count.max(1)],
        }
    }

    /// Bucket a category maps to.
    pub fn bucket_of(&self, category: &str) -> usize {
        category_hash(category, self.buckets.len())
    }

    /// Prepends `record` to its category's chain.
    pub fn insert(&mut self, record: FurnitureRecord) {
        let bucket = self.bucket_of(&record.category);
        self.buckets[bucket].push(record);
    }

    /// Every copy whose category equals `category`, most recent first.
    pub fn lookup<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a FurnitureRecord> {
        let bucket = self.bucket_of(category);
        self.buckets[bucket]
            .iter()
            .rev()
            .filter(move |rec| rec.category == category)
    }

    /// Number of copies chained in `bucket`, across all categories.
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, Vec::len)
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of copies held, stale ones included.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Drops every copy, keeping the bucket count.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }
}

/// Sum of the category's bytes, modulo `buckets`.
pub fn category_hash(category: &str, buckets: usize) -> usize {
    let sum = category
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_add(usize::from(b)));
    sum % buckets.max(1)
}
