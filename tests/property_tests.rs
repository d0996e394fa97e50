//! Property-based tests for sizing invariants.
//!
//! Tests validate:
//! 1. FitColsToViewport uses exactly the available width
//! 2. Independent and unclamped FitViewportToCols leave widths alone
//! 3. Locked columns get exactly their configured width
//! 4. Content widths respect per-column min/max clamps
//! 5. De-duplicating samples never changes the resolved width

use gridfit::model::{
    AutoSizeOptions, AutoWidthStrategy, CellValue, ColumnId, ColumnSpec, DataAccessError, Row,
    RowDataset,
};
use gridfit::sizing::{
    reconcile, AutoColumnSize, GridHost, LayoutContext, MonospaceMeasurer, PluginOptions,
    ResolvedColumnWidth, ViewportMode, ViewportState,
};
use proptest::prelude::*;

struct Grid {
    columns: Vec<ColumnSpec>,
    data: RowDataset,
    viewport_width_px: u32,
}

impl GridHost for Grid {
    fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut [ColumnSpec] {
        &mut self.columns
    }

    fn data(&self) -> Result<&RowDataset, DataAccessError> {
        Ok(&self.data)
    }

    fn layout_context(&self) -> Option<LayoutContext> {
        Some(LayoutContext::terminal())
    }

    fn viewport_width_px(&self) -> u32 {
        self.viewport_width_px
    }
}

fn resolved(widths: &[u32]) -> Vec<ResolvedColumnWidth> {
    widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            ResolvedColumnWidth::unchanged(
                ColumnId::new(format!("c{}", i)).unwrap(),
                w,
                AutoWidthStrategy::AllRows,
            )
        })
        .collect()
}

fn text_grid(values: &[String], auto_size: AutoSizeOptions) -> Grid {
    let data: RowDataset = values
        .iter()
        .map(|v| Row::new().with("text", CellValue::from(v.as_str())))
        .collect();
    let column = ColumnSpec::new(ColumnId::new("text").unwrap()).with_auto_size(auto_size);
    Grid {
        columns: vec![column],
        data,
        viewport_width_px: 200,
    }
}

fn independent() -> AutoColumnSize<MonospaceMeasurer> {
    let options = PluginOptions {
        viewport_mode: ViewportMode::Independent,
        ..Default::default()
    };
    AutoColumnSize::new(options, MonospaceMeasurer::terminal_cells())
}

// ===== Property 1: FitColsToViewport conserves width =====

proptest! {
    #[test]
    fn fit_cols_sum_equals_available(
        widths in prop::collection::vec(1u32..500, 1..8),
        available in 1u32..5000,
    ) {
        let outcome = reconcile(
            &resolved(&widths),
            &ViewportState::new(available, ViewportMode::FitColsToViewport),
        );
        prop_assert_eq!(outcome.total_width(), u64::from(available));
        prop_assert_eq!(outcome.widths.len(), widths.len());
    }

    #[test]
    fn fit_cols_preserves_width_order(
        widths in prop::collection::vec(1u32..500, 2..8),
        available in 100u32..5000,
    ) {
        let outcome = reconcile(
            &resolved(&widths),
            &ViewportState::new(available, ViewportMode::FitColsToViewport),
        );
        for i in 0..widths.len() {
            for j in 0..widths.len() {
                if widths[i] < widths[j] {
                    prop_assert!(outcome.widths[i] <= outcome.widths[j]);
                }
            }
        }
    }
}

// ===== Property 2: Modes that keep widths =====

proptest! {
    #[test]
    fn independent_keeps_widths(
        widths in prop::collection::vec(0u32..2000, 0..8),
        available in 0u32..5000,
    ) {
        let outcome = reconcile(
            &resolved(&widths),
            &ViewportState::new(available, ViewportMode::Independent),
        );
        prop_assert_eq!(outcome.widths, widths);
        prop_assert_eq!(outcome.viewport_width_px, None);
    }

    #[test]
    fn fit_viewport_to_cols_matches_total(
        widths in prop::collection::vec(0u32..2000, 0..8),
        available in 0u32..5000,
    ) {
        let total: u32 = widths.iter().sum();
        let outcome = reconcile(
            &resolved(&widths),
            &ViewportState::new(available, ViewportMode::FitViewportToCols),
        );
        prop_assert_eq!(outcome.viewport_width_px, Some(total));
        prop_assert_eq!(outcome.widths, widths);
    }

    #[test]
    fn fit_viewport_to_cols_respects_limits(
        widths in prop::collection::vec(1u32..500, 1..8),
        min in 0u32..1000,
        extra in 0u32..1000,
    ) {
        let max = min + extra;
        let outcome = reconcile(
            &resolved(&widths),
            &ViewportState::new(0, ViewportMode::FitViewportToCols)
                .with_viewport_limits(Some(min), Some(max)),
        );
        let viewport = outcome.viewport_width_px.unwrap();
        prop_assert!(viewport >= min && viewport <= max);
        prop_assert_eq!(outcome.total_width(), u64::from(viewport));
    }
}

// ===== Property 3-5: Resolution through the plugin =====

proptest! {
    #[test]
    fn locked_width_is_exact(
        width in 1u32..3000,
        values in prop::collection::vec("[a-z]{0,40}", 0..10),
    ) {
        let auto_size = AutoSizeOptions {
            strategy: AutoWidthStrategy::Locked,
            width_px: Some(width),
            ..Default::default()
        };
        let mut grid = text_grid(&values, auto_size);

        independent().resize_all_columns(&mut grid);

        prop_assert_eq!(grid.columns[0].width, width);
    }

    #[test]
    fn content_width_respects_clamps(
        values in prop::collection::vec("[a-zA-Z ]{0,60}", 1..20),
        min in 1u32..40,
        extra in 0u32..40,
    ) {
        let max = min + extra;
        let auto_size = AutoSizeOptions {
            strategy: AutoWidthStrategy::AllRows,
            min_width_px: Some(min),
            max_width_px: Some(max),
            ..Default::default()
        };
        let mut grid = text_grid(&values, auto_size);

        independent().resize_all_columns(&mut grid);

        let width = grid.columns[0].width;
        prop_assert!(width >= min && width <= max, "{} not in [{}, {}]", width, min, max);
    }

    #[test]
    fn de_duplicate_does_not_change_width(
        values in prop::collection::vec("[a-c]{0,6}", 0..30),
    ) {
        let options = |de_duplicate| AutoSizeOptions {
            strategy: AutoWidthStrategy::AllRows,
            de_duplicate,
            ..Default::default()
        };
        let mut with_dedup = text_grid(&values, options(true));
        let mut without_dedup = text_grid(&values, options(false));

        independent().resize_all_columns(&mut with_dedup);
        independent().resize_all_columns(&mut without_dedup);

        prop_assert_eq!(with_dedup.columns[0].width, without_dedup.columns[0].width);
    }
}
