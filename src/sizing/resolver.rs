//! Per-column width resolution.
//!
//! Combines a column's strategy with sampled, measured content and the
//! column's own constraints to produce one width, before any viewport
//! fitting.

use super::cache::WidthCache;
use super::measure::WidthMeasurer;
use super::options::PluginOptions;
use super::sampling::sample;
use crate::model::{AutoWidthStrategy, ColumnConfigError, ColumnId, ColumnSpec, RowDataset};
use tracing::{debug, warn};

/// Where a resolved width came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSource {
    /// Measured from sampled content (and `width_px` for Guide).
    Measured,
    /// Taken verbatim from `width_px` (Locked).
    Configured,
    /// Served from the width cache.
    Cached,
    /// The column is not resizable; its current width stands.
    NotResizable,
    /// Configuration was invalid; the column kept its prior width.
    Fallback,
}

/// Width of one column after strategy and clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumnWidth {
    /// Column this width belongs to.
    pub column_id: ColumnId,
    /// Width before viewport fitting.
    pub width_px: u32,
    /// Clamping to the column cap or min/max changed the width.
    pub was_clamped: bool,
    /// Strategy the width was resolved with.
    pub used_strategy: AutoWidthStrategy,
    /// Where the width came from.
    pub source: WidthSource,
    /// Held fixed by viewport fitting (Locked or not resizable).
    pub fixed: bool,
    /// Lower clamp honoured by viewport fitting.
    pub min_width_px: Option<u32>,
    /// Upper clamp honoured by viewport fitting.
    pub max_width_px: Option<u32>,
    /// Absorbs leftover viewport space.
    pub size_to_remaining: bool,
    /// Share of leftover space.
    pub remaining_weight: Option<f64>,
    /// Rendered header width, when the header was measured.
    pub header_px: Option<u32>,
    /// Widest sampled value without the pad, when values were measured.
    pub content_px: Option<u32>,
    /// Non-fatal configuration problems found while resolving.
    pub warnings: Vec<ColumnConfigError>,
}

impl ResolvedColumnWidth {
    /// A flexible width with no constraints.
    pub fn unchanged(column_id: ColumnId, width_px: u32, used_strategy: AutoWidthStrategy) -> Self {
        Self {
            column_id,
            width_px,
            was_clamped: false,
            used_strategy,
            source: WidthSource::Fallback,
            fixed: false,
            min_width_px: None,
            max_width_px: None,
            size_to_remaining: false,
            remaining_weight: None,
            header_px: None,
            content_px: None,
            warnings: Vec::new(),
        }
    }

    /// The column's current width, carrying its constraints and flags.
    pub fn prior(column: &ColumnSpec, source: WidthSource) -> Self {
        let opts = &column.auto_size;
        let locked = opts.strategy == AutoWidthStrategy::Locked;
        let fixed = locked || !column.resizable;
        Self {
            column_id: column.id.clone(),
            width_px: column.width,
            was_clamped: false,
            used_strategy: opts.strategy,
            source,
            fixed,
            min_width_px: if fixed { None } else { opts.min_width_px },
            max_width_px: if fixed { None } else { opts.max_width_px },
            size_to_remaining: opts.size_to_remaining,
            remaining_weight: opts.remaining_weight,
            header_px: None,
            content_px: None,
            warnings: Vec::new(),
        }
    }

    /// Replace the width.
    pub fn with_width(mut self, width_px: u32) -> Self {
        self.width_px = width_px;
        self
    }

    /// Hold the width fixed during viewport fitting.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Set the clamps honoured by viewport fitting.
    pub fn with_constraints(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_width_px = min;
        self.max_width_px = max;
        self
    }

    /// Mark as absorbing leftover space with an optional weight.
    pub fn size_to_remaining(mut self, weight: Option<f64>) -> Self {
        self.size_to_remaining = true;
        self.remaining_weight = weight;
        self
    }
}

/// Resolves column widths for one pass.
pub struct ColumnResolver<'a> {
    measurer: WidthMeasurer<'a>,
    options: &'a PluginOptions,
}

impl<'a> ColumnResolver<'a> {
    /// Resolver for one pass.
    pub fn new(measurer: WidthMeasurer<'a>, options: &'a PluginOptions) -> Self {
        Self { measurer, options }
    }

    /// Resolve through the cache.
    ///
    /// A cached width for the same column and dataset version is returned
    /// as-is; otherwise the width is computed and stored. Non-resizable
    /// columns bypass the cache.
    pub fn resolve(
        &self,
        column: &ColumnSpec,
        dataset: &RowDataset,
        cache: &mut WidthCache,
    ) -> Result<ResolvedColumnWidth, ColumnConfigError> {
        if !column.resizable {
            return Ok(ResolvedColumnWidth::prior(column, WidthSource::NotResizable));
        }

        if let Some(hit) = cache.get(&column.id, dataset.version()) {
            let mut hit = hit.clone();
            hit.source = WidthSource::Cached;
            return Ok(hit);
        }

        let resolved = self.resolve_uncached(column, dataset)?;
        cache.put(dataset.version(), resolved.clone());
        Ok(resolved)
    }

    /// Resolve without consulting or filling any cache.
    ///
    /// # Errors
    ///
    /// - [`ColumnConfigError::MissingWidthPx`] for Locked or Guide without `width_px`
    /// - [`ColumnConfigError::MinExceedsMax`] for contradictory clamps
    /// - [`ColumnConfigError::MissingField`] when rows must be sampled but there is no field
    pub fn resolve_uncached(
        &self,
        column: &ColumnSpec,
        dataset: &RowDataset,
    ) -> Result<ResolvedColumnWidth, ColumnConfigError> {
        if !column.resizable {
            return Ok(ResolvedColumnWidth::prior(column, WidthSource::NotResizable));
        }

        let opts = &column.auto_size;
        let strategy = opts.strategy;

        if strategy == AutoWidthStrategy::Locked {
            return self.resolve_locked(column);
        }

        if let (Some(min), Some(max)) = (opts.min_width_px, opts.max_width_px) {
            if min > max {
                return Err(ColumnConfigError::MinExceedsMax {
                    column: column.id.clone(),
                    min,
                    max,
                });
            }
        }

        let guide_px = match strategy {
            AutoWidthStrategy::Guide => Some(opts.width_px.ok_or_else(|| {
                ColumnConfigError::MissingWidthPx {
                    column: column.id.clone(),
                    strategy,
                }
            })?),
            _ => None,
        };

        let measurement = self.measurer.measure_max(sample(column, dataset)?, column);
        let measured = measurement.map(|m| m.widest_px);

        let base = match (guide_px, measured) {
            (Some(guide), Some(content)) => guide.max(content),
            (Some(guide), None) => guide,
            (None, Some(content)) => content,
            // Nothing to measure: keep the prior width.
            (None, None) => column.width,
        };

        let mut width = base;
        if let Some(cap) = self.options.max_column_width_px {
            width = width.min(cap);
        }
        if let Some(max) = opts.max_width_px {
            width = width.min(max);
        }
        if let Some(min) = opts.min_width_px {
            width = width.max(min);
        }

        debug!(
            column = %column.id,
            strategy = %strategy,
            measured = ?measured,
            width,
            "Resolved column width"
        );

        let mut resolved = ResolvedColumnWidth::prior(column, WidthSource::Measured).with_width(width);
        resolved.was_clamped = width != base;
        resolved.header_px = measurement.and_then(|m| m.header_px);
        resolved.content_px = measurement.and_then(|m| m.content_px);
        Ok(resolved)
    }

    fn resolve_locked(&self, column: &ColumnSpec) -> Result<ResolvedColumnWidth, ColumnConfigError> {
        let opts = &column.auto_size;
        let width_px = opts.width_px.ok_or_else(|| ColumnConfigError::MissingWidthPx {
            column: column.id.clone(),
            strategy: AutoWidthStrategy::Locked,
        })?;

        let mut resolved =
            ResolvedColumnWidth::prior(column, WidthSource::Configured).with_width(width_px);

        if opts.has_constraints() {
            let problem = ColumnConfigError::LockedWithConstraints {
                column: column.id.clone(),
            };
            warn!(column = %column.id, "{}", problem);
            resolved.warnings.push(problem);
        }

        Ok(resolved)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
