//! Terminal table host.
//!
//! [`TableHost`] owns the columns and rows shown by the viewer and exposes
//! them to the sizing plugin through [`GridHost`]. Widths are terminal cells:
//! the layout context is [`LayoutContext::terminal`], so one "pixel" is one
//! cell.

use super::constants::COLUMN_SPACING;
use crate::model::{CellValue, ColumnSpec, DataAccessError, Row, RowDataset};
use crate::sizing::{GridHost, LayoutContext, ResizeReport, ViewportMode};
use ratatui::{
    layout::{Constraint, Flex, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row as TableRow, Table},
    Frame,
};
use std::fmt::Write as _;

/// Columns, rows and viewport state of the terminal table.
#[derive(Debug, Clone)]
pub struct TableHost {
    columns: Vec<ColumnSpec>,
    data: RowDataset,
    /// Terminal cells available to the table, spacing included.
    available_cells: u16,
    /// Table width requested by a FitViewportToCols pass, spacing excluded.
    fitted_width: Option<u32>,
    selected: usize,
    last_report: Option<ResizeReport>,
}

impl TableHost {
    /// Host for `columns` over `data`, `available_cells` wide.
    pub fn new(columns: Vec<ColumnSpec>, data: RowDataset, available_cells: u16) -> Self {
        Self {
            columns,
            data,
            available_cells,
            fitted_width: None,
            selected: 0,
            last_report: None,
        }
    }

    /// Terminal cells available, spacing included.
    pub fn available_cells(&self) -> u16 {
        self.available_cells
    }

    /// Update the terminal width, e.g. after a resize event.
    pub fn set_available_cells(&mut self, cells: u16) {
        self.available_cells = cells;
    }

    /// Table width chosen by the last FitViewportToCols pass.
    pub fn fitted_width(&self) -> Option<u32> {
        self.fitted_width
    }

    /// Report of the last applied pass.
    pub fn last_report(&self) -> Option<&ResizeReport> {
        self.last_report.as_ref()
    }

    /// Index of the selected column.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected column.
    pub fn selected_column(&self) -> Option<&ColumnSpec> {
        self.columns.get(self.selected)
    }

    /// Select the column at `index`; out of range is ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.columns.len() {
            self.selected = index;
        }
    }

    /// Select the column to the left.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select the column to the right.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.columns.len() {
            self.selected += 1;
        }
    }

    fn spacing_total(&self) -> u32 {
        let gaps = self.columns.len().saturating_sub(1) as u32;
        gaps * u32::from(COLUMN_SPACING)
    }

    /// Width the table is drawn at inside `area`.
    fn table_area(&self, area: Rect) -> Rect {
        match self.fitted_width {
            Some(width) => {
                let wanted = width.saturating_add(self.spacing_total());
                let clamped = u16::try_from(wanted).unwrap_or(u16::MAX).min(area.width);
                Rect { width: clamped, ..area }
            }
            None => area,
        }
    }

    /// Index of the column whose header cell covers `(x, y)`.
    ///
    /// `area` is the table area the last frame was drawn into. Only the
    /// header row is clickable.
    pub fn header_column_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        let area = self.table_area(area);
        if y != area.y || x < area.x || x >= area.right() {
            return None;
        }

        let mut start = u32::from(area.x);
        for (index, column) in self.columns.iter().enumerate() {
            let end = start.saturating_add(column.width);
            if u32::from(x) >= start && u32::from(x) < end {
                return Some(index);
            }
            start = end.saturating_add(u32::from(COLUMN_SPACING));
        }
        None
    }

    /// Draw the header and rows into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let header = TableRow::new(self.columns.iter().enumerate().map(|(index, column)| {
            let cell = Cell::from(column.name.clone());
            if index == self.selected {
                cell.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                cell
            }
        }))
        .style(Style::default().add_modifier(Modifier::BOLD));

        let body_height = usize::from(area.height.saturating_sub(1));
        let rows = self.data.rows().iter().take(body_height).map(|row| {
            TableRow::new(self.columns.iter().map(|column| Cell::from(cell_text(column, row))))
        });

        let widths = self
            .columns
            .iter()
            .map(|c| Constraint::Length(u16::try_from(c.width).unwrap_or(u16::MAX)));

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start);

        frame.render_widget(table, self.table_area(area));
    }

    /// One `id<TAB>width` line per column, then the fitted viewport if any.
    pub fn width_listing(&self) -> String {
        let mut out = String::new();
        for column in &self.columns {
            let _ = writeln!(out, "{}\t{}", column.id, column.width);
        }
        if let Some(width) = self.fitted_width {
            let _ = writeln!(out, "viewport\t{}", width);
        }
        out
    }

    /// Status bar text for the current mode and selection.
    pub fn status_line(&self, mode: ViewportMode) -> String {
        let column = self
            .selected_column()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        format!(
            " {} | {} | Ctrl+Shift+A: resize all | Enter: resize column | m: mode | q: quit",
            mode, column
        )
    }
}

/// Rendered text of `column` for `row`, through its formatter if it has one.
pub fn cell_text(column: &ColumnSpec, row: &Row) -> String {
    let value = column
        .field
        .as_ref()
        .and_then(|field| row.get(field.as_str()))
        .cloned()
        .unwrap_or(CellValue::Null);

    match &column.formatter {
        Some(formatter) => formatter.format(&value, Some(row)),
        None => value.to_display_string(),
    }
}

impl GridHost for TableHost {
    fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut [ColumnSpec] {
        &mut self.columns
    }

    fn data(&self) -> Result<&RowDataset, DataAccessError> {
        Ok(&self.data)
    }

    /// Detached until the terminal reports a width.
    fn layout_context(&self) -> Option<LayoutContext> {
        (self.available_cells > 0).then(LayoutContext::terminal)
    }

    fn viewport_width_px(&self) -> u32 {
        u32::from(self.available_cells).saturating_sub(self.spacing_total())
    }

    fn set_viewport_width_px(&mut self, width_px: u32) {
        self.fitted_width = Some(width_px);
    }

    fn notify_columns_resized(&mut self, report: &ResizeReport) {
        if report.viewport_width_px.is_none() {
            self.fitted_width = None;
        }
        self.last_report = Some(report.clone());
    }
}
