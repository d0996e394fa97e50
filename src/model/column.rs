//! Column definitions and their auto-size settings.

use super::dataset::Row;
use super::error::ColumnConfigError;
use super::identifiers::{ColumnId, FieldKey};
use super::value::CellValue;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Named policy determining where a column's width comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AutoWidthStrategy {
    /// Exactly `width_px`; never scaled, min/max ignored.
    Locked,
    /// `width_px` is a floor; content may widen it and viewport fitting may scale it.
    Guide,
    /// Content of the first row only (dates, GUIDs and other fixed formats).
    Top1Row,
    /// Widest content among the first `check_row_count` rows.
    #[default]
    TopNRows,
    /// Content of the last row only (incrementing numbers).
    Last1Row,
    /// Widest content among all rows.
    AllRows,
}

impl AutoWidthStrategy {
    /// Whether this strategy derives the width from sampled content.
    pub fn samples_rows(self) -> bool {
        !matches!(self, AutoWidthStrategy::Locked | AutoWidthStrategy::Guide)
    }

    /// Canonical long name.
    pub fn as_str(self) -> &'static str {
        match self {
            AutoWidthStrategy::Locked => "Locked",
            AutoWidthStrategy::Guide => "Guide",
            AutoWidthStrategy::Top1Row => "Top1Row",
            AutoWidthStrategy::TopNRows => "TopNRows",
            AutoWidthStrategy::Last1Row => "Last1Row",
            AutoWidthStrategy::AllRows => "AllRows",
        }
    }
}

impl fmt::Display for AutoWidthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutoWidthStrategy {
    type Err = ColumnConfigError;

    /// Accepts the long names, their `First*` aliases and the short codes
    /// (`LK`, `GU`, `TOP1`, `TOPN`, `LAST1`, `ALL`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let strategy = match s.trim().to_ascii_lowercase().as_str() {
            "locked" | "lk" => AutoWidthStrategy::Locked,
            "guide" | "gu" => AutoWidthStrategy::Guide,
            "top1row" | "first1row" | "firstrow" | "top1" => AutoWidthStrategy::Top1Row,
            "topnrows" | "firstnrows" | "topn" => AutoWidthStrategy::TopNRows,
            "last1row" | "lastrow" | "last1" => AutoWidthStrategy::Last1Row,
            "allrows" | "all" => AutoWidthStrategy::AllRows,
            _ => {
                return Err(ColumnConfigError::UnknownStrategy {
                    name: s.to_string(),
                })
            }
        };
        Ok(strategy)
    }
}

/// Value-to-text transform used for display and measurement.
///
/// Receives the raw value and, when the value came from a row, the whole row.
#[derive(Clone)]
pub struct ValueFormatter(Arc<dyn Fn(&CellValue, Option<&Row>) -> String + Send + Sync>);

impl ValueFormatter {
    /// Wrap a formatting closure.
    pub fn new(f: impl Fn(&CellValue, Option<&Row>) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Render `value`, with its row when known.
    pub fn format(&self, value: &CellValue, row: Option<&Row>) -> String {
        (self.0)(value, row)
    }
}

impl fmt::Debug for ValueFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormatter(..)")
    }
}

/// Default sample size for `TopNRows`.
pub const DEFAULT_CHECK_ROW_COUNT: usize = 100;

/// Per-column auto-size settings.
#[derive(Debug, Clone)]
pub struct AutoSizeOptions {
    /// Where the width comes from.
    pub strategy: AutoWidthStrategy,
    /// Fixed width for Locked, floor for Guide.
    pub width_px: Option<u32>,
    /// Absolute lower clamp (ignored for Locked).
    pub min_width_px: Option<u32>,
    /// Absolute upper clamp (ignored for Locked).
    pub max_width_px: Option<u32>,
    /// Leave the header out of the widest-content search.
    pub ignore_header_text: bool,
    /// Absorb leftover viewport space in FitColsToViewport.
    pub size_to_remaining: bool,
    /// Share of leftover space; defaults to the resolved width.
    pub remaining_weight: Option<f64>,
    /// Rows inspected by TopNRows.
    pub check_row_count: usize,
    /// Measure each distinct raw value once.
    pub de_duplicate: bool,
    /// Values measured instead of row data (drop-down choices, longest date form).
    pub col_value_array: Option<Vec<CellValue>>,
    /// Cheaper formatter used only for measurement.
    pub formatter_override: Option<ValueFormatter>,
}

impl Default for AutoSizeOptions {
    fn default() -> Self {
        Self {
            strategy: AutoWidthStrategy::default(),
            width_px: None,
            min_width_px: None,
            max_width_px: None,
            ignore_header_text: false,
            size_to_remaining: false,
            remaining_weight: None,
            check_row_count: DEFAULT_CHECK_ROW_COUNT,
            de_duplicate: true,
            col_value_array: None,
            formatter_override: None,
        }
    }
}

impl AutoSizeOptions {
    /// Whether a min or max clamp is configured.
    pub fn has_constraints(&self) -> bool {
        self.min_width_px.is_some() || self.max_width_px.is_some()
    }
}

/// A grid column as configured by the host.
///
/// The sizing core reads everything here and writes back only `width` and
/// `min_width`.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Stable identifier, unique within the grid.
    pub id: ColumnId,
    /// Header text.
    pub name: String,
    /// Row field the column displays; `None` for computed columns.
    pub field: Option<FieldKey>,
    /// Whether the sizing plugin may change the width.
    pub resizable: bool,
    /// Current width in pixels.
    pub width: u32,
    /// Host-grid minimum width; set to the resolved width on write-back.
    pub min_width: Option<u32>,
    /// Normal cell formatter.
    pub formatter: Option<ValueFormatter>,
    /// Auto-size settings.
    pub auto_size: AutoSizeOptions,
}

/// Width a column starts with before any pass.
pub const DEFAULT_COLUMN_WIDTH: u32 = 80;

impl ColumnSpec {
    /// Resizable column whose id doubles as its field key and header text.
    pub fn new(id: ColumnId) -> Self {
        let field = FieldKey::new(id.as_str()).ok();
        Self {
            name: id.as_str().to_string(),
            id,
            field,
            resizable: true,
            width: DEFAULT_COLUMN_WIDTH,
            min_width: None,
            formatter: None,
            auto_size: AutoSizeOptions::default(),
        }
    }

    /// Set the header text.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set or clear the field key.
    pub fn with_field(mut self, field: Option<FieldKey>) -> Self {
        self.field = field;
        self
    }

    /// Set the current width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Allow or forbid resizing.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set the cell formatter.
    pub fn with_formatter(mut self, formatter: ValueFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Replace all auto-size settings.
    pub fn with_auto_size(mut self, auto_size: AutoSizeOptions) -> Self {
        self.auto_size = auto_size;
        self
    }

    /// Set only the strategy.
    pub fn with_strategy(mut self, strategy: AutoWidthStrategy) -> Self {
        self.auto_size.strategy = strategy;
        self
    }

    /// Set the strategy from its configured name.
    pub fn with_strategy_name(self, name: &str) -> Result<Self, ColumnConfigError> {
        Ok(self.with_strategy(name.parse()?))
    }
}
