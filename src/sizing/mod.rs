//! Column width auto-sizing (pure core plus the plugin facade).
//!
//! A pass flows `sampling` → `measure` → `resolver` → `viewport`; the
//! [`AutoColumnSize`] plugin wires those together against a [`GridHost`].

pub mod cache;
pub mod measure;
pub mod options;
pub mod plugin;
pub mod resolver;
pub mod sampling;
pub mod viewport;

pub use cache::{WidthCache, WidthCacheKey};
pub use measure::{FontSpec, LayoutContext, Measurement, MonospaceMeasurer, TextMeasurer, WidthMeasurer};
pub use options::{
    PluginOptions, PluginOptionsPatch, ViewportMode, ViewportState, DEFAULT_MAX_COLUMN_WIDTH_PX,
    DEFAULT_PADDING_PX,
};
pub use plugin::{AutoColumnSize, GridHost, PassOutcome, ResizeReport, SkipReason};
pub use resolver::{ColumnResolver, ResolvedColumnWidth, WidthSource};
pub use sampling::{all_values, sample, RawSample, Samples};
pub use viewport::{reconcile, ReconcileNote, ReconcileOutcome};
