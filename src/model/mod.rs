//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod column;
pub mod dataset;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod value;

// Re-export for convenience
pub use column::{
    AutoSizeOptions, AutoWidthStrategy, ColumnSpec, ValueFormatter, DEFAULT_CHECK_ROW_COUNT,
    DEFAULT_COLUMN_WIDTH,
};
pub use dataset::{DatasetVersion, Row, RowDataset};
pub use error::{AppError, ColumnConfigError, DataAccessError, InputError, SizingError};
pub use identifiers::{ColumnId, FieldKey, InvalidColumnId, InvalidFieldKey};
pub use key_action::SizingAction;
pub use value::CellValue;
