//! Error types for gridfit.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`SizingError`] - Failures inside one resize pass
//!   - [`ColumnConfigError`] - Invalid or contradictory column configuration
//!   - `MeasurementUnavailable` - The grid is detached, there is nothing to measure against
//!   - [`DataAccessError`] - The row data could not be unwrapped into a snapshot
//! - [`InputError`] - Dataset file loading failures
//! - [`AppError`] - Top-level binary error
//!
//! # Error Recovery Strategy
//!
//! Column configuration errors are **non-fatal**: they are reported through
//! `tracing::warn!` and the affected column keeps its prior width while its
//! siblings are still resized. `MeasurementUnavailable` aborts the whole pass
//! silently. None of these reach the host caller; the plugin facade turns them
//! into a [`PassOutcome`](crate::sizing::PassOutcome).

use crate::model::identifiers::ColumnId;
use crate::model::column::AutoWidthStrategy;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the dataset file.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Failed to load the configuration file.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Failed to set up file logging.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal setup or rendering error.
    #[error(transparent)]
    Tui(#[from] crate::view::TuiError),

    /// Writing the width listing failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Failure of a single resize pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SizingError {
    /// A column's configuration is invalid or contradictory.
    #[error(transparent)]
    Config(#[from] ColumnConfigError),

    /// The grid has no live layout container, so nothing can be measured.
    ///
    /// This is a deliberate skip, not a failure.
    #[error("Measurement unavailable: grid is detached from its layout container")]
    MeasurementUnavailable,

    /// The row data could not be read.
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

/// Invalid or contradictory sizing configuration on a column.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColumnConfigError {
    /// The strategy name does not match any known strategy.
    #[error("Unknown auto width strategy '{name}'")]
    UnknownStrategy {
        /// The name as written in configuration.
        name: String,
    },

    /// The viewport mode name does not match any known mode.
    #[error("Unknown viewport mode '{name}'")]
    UnknownViewportMode {
        /// The name as written in configuration.
        name: String,
    },

    /// A row-sampling strategy was configured on a column with no field key
    /// and no explicit value list.
    #[error("Column '{column}' samples rows but has no field")]
    MissingField {
        /// Offending column.
        column: ColumnId,
    },

    /// Locked and Guide need a configured `width_px`.
    #[error("Column '{column}' uses {strategy:?} but has no width_px")]
    MissingWidthPx {
        /// Offending column.
        column: ColumnId,
        /// Strategy that needs the width.
        strategy: AutoWidthStrategy,
    },

    /// Locked columns ignore min/max constraints.
    ///
    /// Reported as a warning only: resolution continues with the locked width.
    #[error("Column '{column}' is Locked; min_width_px/max_width_px are ignored")]
    LockedWithConstraints {
        /// Offending column.
        column: ColumnId,
    },

    /// `min_width_px` greater than `max_width_px`.
    #[error("Column '{column}' has min_width_px {min} > max_width_px {max}")]
    MinExceedsMax {
        /// Offending column.
        column: ColumnId,
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// The host could not provide a concrete row snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataAccessError {
    /// The data view has not been populated yet.
    #[error("Row data is not available: {reason}")]
    Unavailable {
        /// Host-provided explanation.
        reason: String,
    },
}

/// Errors encountered when loading a dataset file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified data file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use gridfit::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// A line (or the whole file, for `.json`) is not valid JSON.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number; 1 for whole-file JSON.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// A row is valid JSON but not an object.
    #[error("Row at line {line} is not a JSON object")]
    NotAnObject {
        /// 1-based line number, or 1-based array index for `.json` files.
        line: usize,
    },

    /// Generic I/O error reading the data file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
