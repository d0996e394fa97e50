//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `SizingAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizingAction {
    /// Run a full resize pass over every resizable column. Default: Ctrl+Shift+A
    ResizeAll,
    /// Forget cached widths so the next pass re-measures. Default: Ctrl+r
    InvalidateCache,
    /// Cycle Independent → FitColsToViewport → FitViewportToCols. Default: m
    CycleViewportMode,
    /// Move the selected column left. Default: h/←
    SelectPrevColumn,
    /// Move the selected column right. Default: l/→
    SelectNextColumn,
    /// Auto-size the selected column only. Default: Enter
    ResizeSelected,
    /// Quit the viewer. Default: q/Esc
    Quit,
}
