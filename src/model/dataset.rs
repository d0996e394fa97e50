//! Row records and the dataset snapshot a resize pass reads.

use super::value::CellValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Identity of one dataset snapshot.
///
/// Every new dataset and every mutable borrow of its rows gets a fresh
/// version, so cached widths keyed on it go stale whenever the data may have
/// changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetVersion(u64);

impl DatasetVersion {
    fn next() -> Self {
        Self(NEXT_VERSION.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One row record: field key to raw value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, CellValue>,
}

impl Row {
    /// Empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered, indexable sequence of rows.
///
/// May be the full backing store or a virtualised subset; the sizing core
/// only indexes into it.
#[derive(Debug, Clone)]
pub struct RowDataset {
    rows: Vec<Row>,
    version: DatasetVersion,
}

impl RowDataset {
    /// Wrap `rows` as a new snapshot.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            version: DatasetVersion::next(),
        }
    }

    /// A snapshot with no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Identity of this snapshot.
    pub fn version(&self) -> DatasetVersion {
        self.version
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable access to the rows. Bumps the dataset version.
    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        self.version = DatasetVersion::next();
        &mut self.rows
    }

    /// Row at `index`.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for RowDataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Row> for RowDataset {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
