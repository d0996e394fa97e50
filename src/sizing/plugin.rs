//! The auto column size plugin facade.
//!
//! [`AutoColumnSize`] drives one resize pass over a [`GridHost`]: it reads the
//! columns, data and layout metrics from the host, resolves and reconciles
//! widths, and writes the result back. It never returns an error; every pass
//! ends in a [`PassOutcome`].

use super::cache::WidthCache;
use super::measure::{LayoutContext, TextMeasurer, WidthMeasurer};
use super::options::{PluginOptions, PluginOptionsPatch, ViewportMode};
use super::resolver::{ColumnResolver, ResolvedColumnWidth, WidthSource};
use super::sampling::all_values;
use super::viewport::{reconcile, ReconcileNote};
use crate::model::{
    ColumnConfigError, ColumnId, ColumnSpec, DataAccessError, RowDataset, SizingAction,
    SizingError,
};
use tracing::{debug, info, warn};

/// What the plugin needs from the grid it sizes.
pub trait GridHost {
    /// Columns in display order.
    fn columns(&self) -> &[ColumnSpec];

    /// Columns for write-back, same order as [`GridHost::columns`].
    fn columns_mut(&mut self) -> &mut [ColumnSpec];

    /// Concrete row snapshot for this pass.
    fn data(&self) -> Result<&RowDataset, DataAccessError>;

    /// Position of the column with `id`.
    fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns().iter().position(|c| &c.id == id)
    }

    /// Live font and padding metrics; `None` while the grid is detached.
    fn layout_context(&self) -> Option<LayoutContext>;

    /// Width available to the columns.
    fn viewport_width_px(&self) -> u32;

    /// Called when the viewport mode wants the viewport resized.
    fn set_viewport_width_px(&mut self, _width_px: u32) {}

    /// Called after new widths were written to the columns.
    fn notify_columns_resized(&mut self, _report: &ResizeReport) {}
}

/// Why a pass did nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No layout metrics to measure against.
    Detached,
    /// The host could not hand out its rows.
    DataUnavailable(DataAccessError),
    /// No column has the requested id or header.
    UnknownColumn(String),
    /// The target column is not resizable.
    NotResizable(ColumnId),
    /// The target of a single-column pass is misconfigured.
    InvalidConfig(ColumnConfigError),
}

impl SkipReason {
    /// The error behind the skip, if it was caused by one.
    pub fn as_error(&self) -> Option<SizingError> {
        match self {
            SkipReason::Detached => Some(SizingError::MeasurementUnavailable),
            SkipReason::DataUnavailable(err) => Some(SizingError::DataAccess(err.clone())),
            SkipReason::InvalidConfig(err) => Some(SizingError::Config(err.clone())),
            SkipReason::UnknownColumn(_) | SkipReason::NotResizable(_) => None,
        }
    }
}

/// Everything one applied pass decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeReport {
    /// Final width per column, in column order.
    pub widths: Vec<u32>,
    /// Viewport width set by FitViewportToCols.
    pub viewport_width_px: Option<u32>,
    /// Mode applied after any fallback.
    pub effective_mode: ViewportMode,
    /// Per-column widths before viewport fitting.
    pub resolved: Vec<ResolvedColumnWidth>,
    /// Configuration problems found on individual columns.
    pub diagnostics: Vec<ColumnConfigError>,
    /// Adjustments made while fitting to the viewport.
    pub notes: Vec<ReconcileNote>,
}

impl ResizeReport {
    /// Final width of the column with `id`.
    pub fn width_of(&self, id: &ColumnId) -> Option<u32> {
        self.resolved
            .iter()
            .position(|r| &r.column_id == id)
            .and_then(|i| self.widths.get(i).copied())
    }
}

/// Result of a resize request.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// Widths were written to the host.
    Applied(ResizeReport),
    /// Nothing was changed.
    Skipped(SkipReason),
}

impl PassOutcome {
    /// The report of an applied pass.
    pub fn report(&self) -> Option<&ResizeReport> {
        match self {
            PassOutcome::Applied(report) => Some(report),
            PassOutcome::Skipped(_) => None,
        }
    }

    /// Whether widths were written.
    pub fn is_applied(&self) -> bool {
        matches!(self, PassOutcome::Applied(_))
    }
}

#[derive(Clone, Copy)]
enum Target<'a> {
    All,
    One(&'a ColumnId),
}

/// Column auto-sizing over any [`GridHost`].
pub struct AutoColumnSize<M> {
    options: PluginOptions,
    measurer: M,
    cache: WidthCache,
}

impl<M: TextMeasurer> AutoColumnSize<M> {
    /// Plugin with `options` measuring through `measurer`.
    pub fn new(options: PluginOptions, measurer: M) -> Self {
        Self {
            options,
            measurer,
            cache: WidthCache::new(),
        }
    }

    /// Current options.
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Merge `patch` into the current options.
    ///
    /// Cached widths are dropped since the pad and column cap feed into them.
    pub fn set_options(&mut self, patch: PluginOptionsPatch) {
        self.options.merge(patch);
        self.cache.invalidate();
    }

    /// Force the next pass to re-measure every column.
    pub fn invalidate_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Resize every resizable column and fit the result to the viewport.
    pub fn resize_all_columns<H: GridHost + ?Sized>(&mut self, host: &mut H) -> PassOutcome {
        self.run_pass(host, Target::All)
    }

    /// Resize the column whose id, or failing that whose header, is `name`.
    pub fn resize_column_by_name<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        name: &str,
    ) -> PassOutcome {
        let found = host
            .columns()
            .iter()
            .find(|c| c.id.as_str() == name)
            .or_else(|| host.columns().iter().find(|c| c.name == name))
            .map(|c| c.id.clone());

        match found {
            Some(id) => self.resize_column(host, &id),
            None => {
                debug!(name, "No column to resize");
                PassOutcome::Skipped(SkipReason::UnknownColumn(name.to_string()))
            }
        }
    }

    /// Re-measure one column, bypassing the cache.
    ///
    /// The other columns contribute their resolved widths, from the cache when
    /// it has them, and the whole set is then fitted to the viewport again.
    /// Repeating the call on unchanged data gives the same layout.
    pub fn resize_column<H: GridHost + ?Sized>(&mut self, host: &mut H, id: &ColumnId) -> PassOutcome {
        self.run_pass(host, Target::One(id))
    }

    /// Header double-click: auto-fit that column.
    pub fn handle_header_double_click<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: &ColumnId,
    ) -> PassOutcome {
        self.resize_column(host, id)
    }

    /// Apply a bound key action. Returns the pass outcome if one ran.
    pub fn handle_action<H: GridHost + ?Sized>(
        &mut self,
        action: SizingAction,
        host: &mut H,
    ) -> Option<PassOutcome> {
        match action {
            SizingAction::ResizeAll => Some(self.resize_all_columns(host)),
            SizingAction::InvalidateCache => {
                self.invalidate_cache();
                None
            }
            SizingAction::CycleViewportMode => {
                self.options.viewport_mode = self.options.viewport_mode.cycle();
                info!(mode = %self.options.viewport_mode, "Viewport mode changed");
                Some(self.resize_all_columns(host))
            }
            SizingAction::SelectPrevColumn
            | SizingAction::SelectNextColumn
            | SizingAction::ResizeSelected
            | SizingAction::Quit => None,
        }
    }

    /// Rendered header width of every column, in column order.
    ///
    /// `None` while the grid is detached.
    pub fn column_header_widths<H: GridHost + ?Sized>(&self, host: &H) -> Option<Vec<u32>> {
        let context = host.layout_context()?;
        let measurer = WidthMeasurer::new(&self.measurer, &context, self.options.padding_px);
        Some(host.columns().iter().map(|c| measurer.header_width(c)).collect())
    }

    /// Widest rendered cell text of every column over all rows, without the
    /// safety pad.
    ///
    /// Strategy and sampling settings are ignored. A column without a field,
    /// or a grid without rows, measures 0. `None` while the grid is detached
    /// or its rows are unavailable.
    pub fn column_text_widths<H: GridHost + ?Sized>(&self, host: &H) -> Option<Vec<u32>> {
        let context = host.layout_context()?;
        let data = host.data().ok()?;
        let measurer = WidthMeasurer::new(&self.measurer, &context, self.options.padding_px);
        let widths = host
            .columns()
            .iter()
            .map(|column| {
                measurer
                    .measure_max(all_values(column, data), column)
                    .and_then(|m| m.content_px)
                    .unwrap_or(0)
            })
            .collect();
        Some(widths)
    }

    fn run_pass<H: GridHost + ?Sized>(&mut self, host: &mut H, target: Target<'_>) -> PassOutcome {
        let Some(context) = host.layout_context() else {
            debug!("Grid is detached, skipping resize pass");
            return PassOutcome::Skipped(SkipReason::Detached);
        };

        if let Target::One(id) = target {
            let Some(index) = host.column_index(id) else {
                debug!(column = %id, "No column to resize");
                return PassOutcome::Skipped(SkipReason::UnknownColumn(id.to_string()));
            };
            if !host.columns()[index].resizable {
                return PassOutcome::Skipped(SkipReason::NotResizable(id.clone()));
            }
            self.cache.invalidate_column(id);
        }

        let data = match host.data() {
            Ok(data) => data,
            Err(err) => {
                debug!(error = %err, "Row data unavailable, skipping resize pass");
                return PassOutcome::Skipped(SkipReason::DataUnavailable(err));
            }
        };

        let measurer = WidthMeasurer::new(&self.measurer, &context, self.options.padding_px);
        let resolver = ColumnResolver::new(measurer, &self.options);

        let mut resolved = Vec::with_capacity(host.columns().len());
        let mut diagnostics = Vec::new();

        for column in host.columns() {
            let is_target = matches!(target, Target::One(id) if &column.id == id);

            match resolver.resolve(column, data, &mut self.cache) {
                Ok(r) => {
                    diagnostics.extend(r.warnings.iter().cloned());
                    resolved.push(r);
                }
                Err(err) => {
                    warn!(column = %column.id, error = %err, "Keeping prior width");
                    if is_target {
                        return PassOutcome::Skipped(SkipReason::InvalidConfig(err));
                    }
                    diagnostics.push(err);
                    resolved.push(ResolvedColumnWidth::prior(column, WidthSource::Fallback));
                }
            }
        }

        let viewport = self.options.viewport_state(host.viewport_width_px());
        let outcome = reconcile(&resolved, &viewport);

        for (column, width) in host.columns_mut().iter_mut().zip(&outcome.widths) {
            if column.resizable {
                column.width = *width;
                column.min_width = Some(*width);
            }
        }
        if let Some(width_px) = outcome.viewport_width_px {
            host.set_viewport_width_px(width_px);
        }

        let report = ResizeReport {
            widths: outcome.widths,
            viewport_width_px: outcome.viewport_width_px,
            effective_mode: outcome.effective_mode,
            resolved,
            diagnostics,
            notes: outcome.notes,
        };

        debug!(
            columns = report.widths.len(),
            mode = %report.effective_mode,
            diagnostics = report.diagnostics.len(),
            "Resize pass applied"
        );
        host.notify_columns_resized(&report);
        PassOutcome::Applied(report)
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
