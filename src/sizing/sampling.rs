//! Selection of the values a column is measured against.
//!
//! Sampling is pure: calling [`sample`] again on the same column and dataset
//! snapshot yields the same sequence.

use crate::model::{AutoWidthStrategy, CellValue, ColumnConfigError, ColumnSpec, Row, RowDataset};
use std::collections::HashSet;

static MISSING: CellValue = CellValue::Null;

/// One value to be measured, before formatting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawSample<'a> {
    /// The column header text.
    Header(&'a str),
    /// A raw value, with its row when it came from the dataset.
    Value {
        /// The raw value.
        value: &'a CellValue,
        /// Row the value came from.
        row: Option<&'a Row>,
    },
}

/// Lazy, finite, single-pass sequence of samples for one column.
pub struct Samples<'a> {
    inner: Box<dyn Iterator<Item = RawSample<'a>> + 'a>,
}

impl<'a> Iterator for Samples<'a> {
    type Item = RawSample<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for Samples<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Samples(..)")
    }
}

/// Select the samples for `column` from `dataset`.
///
/// - `col_value_array`, when set, replaces the dataset entirely.
/// - Otherwise rows are chosen by strategy: the first row, the first
///   `check_row_count` rows (also used for Guide), the last row, or all rows.
///   Locked columns sample nothing.
/// - With `de_duplicate`, only the first occurrence of each distinct raw value
///   is kept.
/// - The header is appended unless `ignore_header_text` is set.
///
/// # Errors
///
/// [`ColumnConfigError::MissingField`] if rows must be sampled but the column
/// has no field key.
pub fn sample<'a>(
    column: &'a ColumnSpec,
    dataset: &'a RowDataset,
) -> Result<Samples<'a>, ColumnConfigError> {
    let opts = &column.auto_size;

    if opts.strategy == AutoWidthStrategy::Locked {
        return Ok(Samples {
            inner: Box::new(std::iter::empty()),
        });
    }

    let values: Box<dyn Iterator<Item = (&'a CellValue, Option<&'a Row>)> + 'a> =
        match &opts.col_value_array {
            Some(values) => Box::new(values.iter().map(|v| (v, None))),
            None => {
                let field = column
                    .field
                    .as_ref()
                    .ok_or_else(|| ColumnConfigError::MissingField {
                        column: column.id.clone(),
                    })?;
                let rows = select_rows(opts.strategy, opts.check_row_count, dataset.rows());
                Box::new(rows.map(move |row| (row.get(field.as_str()).unwrap_or(&MISSING), Some(row))))
            }
        };

    let values: Box<dyn Iterator<Item = (&'a CellValue, Option<&'a Row>)> + 'a> =
        if opts.de_duplicate {
            let mut seen: HashSet<&'a CellValue> = HashSet::new();
            Box::new(values.filter(move |(value, _)| seen.insert(*value)))
        } else {
            values
        };

    let samples = values.map(|(value, row)| RawSample::Value { value, row });
    let header = (!opts.ignore_header_text).then_some(RawSample::Header(column.name.as_str()));

    Ok(Samples {
        inner: Box::new(samples.chain(header)),
    })
}

/// Every row's value for `column`, ignoring strategy, value list,
/// de-duplication and header. Empty when the column has no field.
pub fn all_values<'a>(
    column: &'a ColumnSpec,
    dataset: &'a RowDataset,
) -> impl Iterator<Item = RawSample<'a>> + 'a {
    let field = column.field.as_ref();
    dataset.rows().iter().filter_map(move |row| {
        let field = field?;
        Some(RawSample::Value {
            value: row.get(field.as_str()).unwrap_or(&MISSING),
            row: Some(row),
        })
    })
}

fn select_rows<'a>(
    strategy: AutoWidthStrategy,
    check_row_count: usize,
    rows: &'a [Row],
) -> Box<dyn Iterator<Item = &'a Row> + 'a> {
    match strategy {
        AutoWidthStrategy::Top1Row => Box::new(rows.iter().take(1)),
        AutoWidthStrategy::TopNRows | AutoWidthStrategy::Guide => {
            Box::new(rows.iter().take(check_row_count))
        }
        AutoWidthStrategy::Last1Row => Box::new(rows.last().into_iter()),
        AutoWidthStrategy::AllRows => Box::new(rows.iter()),
        AutoWidthStrategy::Locked => Box::new(std::iter::empty()),
    }
}
