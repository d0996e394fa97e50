//! Shared fixtures for unit tests.
//!
//! Provides a table-driven text measurer, an in-memory grid host and a buffer
//! dump helper for rendering snapshots.

use crate::model::{ColumnSpec, DataAccessError, RowDataset};
use crate::sizing::{FontSpec, GridHost, LayoutContext, ResizeReport, TextMeasurer};
use std::collections::HashMap;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty trailing lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Measurer with fixed widths for known text; anything else is 10px per char.
#[derive(Debug, Clone, Default)]
pub struct TableMeasurer {
    widths: HashMap<String, f64>,
}

impl TableMeasurer {
    pub fn new<'a>(widths: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            widths: widths
                .into_iter()
                .map(|(text, px)| (text.to_string(), px))
                .collect(),
        }
    }
}

impl TextMeasurer for TableMeasurer {
    fn measure(&self, text: &str, _font: &FontSpec) -> f64 {
        self.widths
            .get(text)
            .copied()
            .unwrap_or(text.chars().count() as f64 * 10.0)
    }
}

/// In-memory grid host recording what the plugin did to it.
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    pub columns: Vec<ColumnSpec>,
    pub data: Result<RowDataset, DataAccessError>,
    pub context: Option<LayoutContext>,
    pub viewport_width_px: u32,
    pub viewport_updates: Vec<u32>,
    pub resize_events: usize,
}

impl MemoryGrid {
    pub fn new(columns: Vec<ColumnSpec>, data: RowDataset, viewport_width_px: u32) -> Self {
        Self {
            columns,
            data: Ok(data),
            context: Some(LayoutContext::new(FontSpec::new("sans-serif", 13.0))),
            viewport_width_px,
            viewport_updates: Vec::new(),
            resize_events: 0,
        }
    }

    pub fn detached(mut self) -> Self {
        self.context = None;
        self
    }

    pub fn widths(&self) -> Vec<u32> {
        self.columns.iter().map(|c| c.width).collect()
    }
}

impl GridHost for MemoryGrid {
    fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut [ColumnSpec] {
        &mut self.columns
    }

    fn data(&self) -> Result<&RowDataset, DataAccessError> {
        self.data.as_ref().map_err(|e| e.clone())
    }

    fn layout_context(&self) -> Option<LayoutContext> {
        self.context.clone()
    }

    fn viewport_width_px(&self) -> u32 {
        self.viewport_width_px
    }

    fn set_viewport_width_px(&mut self, width_px: u32) {
        self.viewport_width_px = width_px;
        self.viewport_updates.push(width_px);
    }

    fn notify_columns_resized(&mut self, _report: &ResizeReport) {
        self.resize_events += 1;
    }
}
