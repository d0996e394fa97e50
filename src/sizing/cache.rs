//! Cache of resolved widths keyed by column and dataset snapshot.

use super::resolver::ResolvedColumnWidth;
use crate::model::{ColumnId, DatasetVersion};
use std::collections::HashMap;

/// Key for width cache lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidthCacheKey {
    /// Column the width belongs to.
    pub column: ColumnId,
    /// Snapshot the width was measured against.
    pub dataset: DatasetVersion,
}

impl WidthCacheKey {
    /// Key for `column` at `dataset`.
    pub fn new(column: ColumnId, dataset: DatasetVersion) -> Self {
        Self { column, dataset }
    }
}

/// Resolved widths from earlier passes.
///
/// An entry is only valid for the dataset version it was computed against;
/// a new snapshot misses automatically. Callers force recomputation by
/// invalidating.
#[derive(Debug, Clone, Default)]
pub struct WidthCache {
    entries: HashMap<WidthCacheKey, ResolvedColumnWidth>,
}

impl WidthCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached width of `column` for exactly this snapshot.
    pub fn get(&self, column: &ColumnId, dataset: DatasetVersion) -> Option<&ResolvedColumnWidth> {
        self.entries
            .get(&WidthCacheKey::new(column.clone(), dataset))
    }

    /// Store a resolved width. Entries for older snapshots of the same column
    /// are dropped.
    pub fn put(&mut self, dataset: DatasetVersion, resolved: ResolvedColumnWidth) {
        let column = resolved.column_id.clone();
        self.entries
            .retain(|key, _| key.column != column || key.dataset == dataset);
        self.entries
            .insert(WidthCacheKey::new(column, dataset), resolved);
    }

    /// Forget the cached width of one column.
    pub fn invalidate_column(&mut self, column: &ColumnId) {
        self.entries.retain(|key, _| &key.column != column);
    }

    /// Forget everything.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of cached widths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AutoWidthStrategy, RowDataset};

    fn resolved(id: &str, width: u32) -> ResolvedColumnWidth {
        ResolvedColumnWidth::unchanged(ColumnId::new(id).unwrap(), width, AutoWidthStrategy::AllRows)
    }

    #[test]
    fn hit_requires_matching_dataset_version() {
        let mut cache = WidthCache::new();
        let a = RowDataset::empty().version();
        let b = RowDataset::empty().version();
        cache.put(a, resolved("x", 10));

        let id = ColumnId::new("x").unwrap();
        assert_eq!(cache.get(&id, a).map(|r| r.width_px), Some(10));
        assert!(cache.get(&id, b).is_none());
    }

    #[test]
    fn put_replaces_stale_versions_of_same_column() {
        let mut cache = WidthCache::new();
        let a = RowDataset::empty().version();
        let b = RowDataset::empty().version();
        cache.put(a, resolved("x", 10));
        cache.put(a, resolved("y", 20));
        cache.put(b, resolved("x", 30));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidate_column_keeps_others() {
        let mut cache = WidthCache::new();
        let v = RowDataset::empty().version();
        cache.put(v, resolved("x", 10));
        cache.put(v, resolved("y", 20));
        cache.invalidate_column(&ColumnId::new("x").unwrap());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&ColumnId::new("y").unwrap(), v).is_some());
    }

    #[test]
    fn invalidate_clears_everything() {
        let mut cache = WidthCache::new();
        let v = RowDataset::empty().version();
        cache.put(v, resolved("x", 10));
        cache.invalidate();
        assert!(cache.is_empty());
    }
}
