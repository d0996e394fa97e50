//! Layout and input timing constants for the table viewer.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line for the viewport mode, the selected column and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Blank cells between adjacent columns.
///
/// Not part of any column width; subtracted from the terminal width before
/// the viewport width is handed to the sizing pass.
pub const COLUMN_SPACING: u16 = 1;

/// Two header clicks on the same column within this window are a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// How long the event loop waits for input before redrawing.
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Viewport width used by `--print` when no width is configured.
pub const DEFAULT_PRINT_WIDTH_CELLS: u16 = 120;
