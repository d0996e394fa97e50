//! TUI rendering and terminal management (impure shell)
//!
//! Shows a dataset as a table whose column widths come from the sizing
//! plugin. `Ctrl+Shift+A` resizes every column, `Enter` or a header
//! double-click resizes one, `m` cycles the viewport mode.

pub mod constants;
mod table;

pub use table::{cell_text, TableHost};

use crate::config::keybindings::KeyBindings;
use crate::model::SizingAction;
use crate::sizing::{AutoColumnSize, MonospaceMeasurer, PassOutcome, SkipReason};
use constants::{DOUBLE_CLICK_WINDOW, EVENT_POLL_INTERVAL, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B: Backend> {
    terminal: Terminal<B>,
    host: TableHost,
    plugin: AutoColumnSize<MonospaceMeasurer>,
    key_bindings: KeyBindings,
    /// `--width` pins the viewport; terminal resizes then leave it alone.
    fixed_width: bool,
    /// Table area of the last drawn frame, for header hit testing.
    table_area: Rect,
    /// Column and time of the last header click.
    last_click: Option<(usize, Instant)>,
    /// Outcome of the last pass that needs the user's attention.
    notice: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Enter raw mode and the alternate screen.
    pub fn new(
        host: TableHost,
        plugin: AutoColumnSize<MonospaceMeasurer>,
        key_bindings: KeyBindings,
        fixed_width: bool,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut app = Self::with_terminal(terminal, host, plugin, key_bindings, fixed_width);
        if !fixed_width {
            let width = app.terminal.size().map(|s| s.width).unwrap_or(0);
            app.host.set_available_cells(width);
        }
        Ok(app)
    }
}

impl<B: Backend> TuiApp<B> {
    fn with_terminal(
        terminal: Terminal<B>,
        host: TableHost,
        plugin: AutoColumnSize<MonospaceMeasurer>,
        key_bindings: KeyBindings,
        fixed_width: bool,
    ) -> Self {
        Self {
            terminal,
            host,
            plugin,
            key_bindings,
            fixed_width,
            table_area: Rect::default(),
            last_click: None,
            notice: None,
        }
    }

    /// The table being shown.
    pub fn host(&self) -> &TableHost {
        &self.host
    }

    /// Size every column, then draw and handle events until the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.resize_all();
        self.draw()?;

        loop {
            if !event::poll(EVENT_POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }

    /// Handle a key press. Returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            SizingAction::Quit => return true,
            SizingAction::SelectPrevColumn => self.host.select_prev(),
            SizingAction::SelectNextColumn => self.host.select_next(),
            SizingAction::ResizeSelected => {
                if let Some(id) = self.host.selected_column().map(|c| c.id.clone()) {
                    let outcome = self.plugin.resize_column(&mut self.host, &id);
                    self.record(&outcome);
                }
            }
            SizingAction::InvalidateCache => {
                self.plugin.handle_action(action, &mut self.host);
                self.notice = Some("cache cleared".to_string());
            }
            SizingAction::ResizeAll | SizingAction::CycleViewportMode => {
                if let Some(outcome) = self.plugin.handle_action(action, &mut self.host) {
                    self.record(&outcome);
                }
            }
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.handle_mouse_at(mouse, Instant::now());
    }

    /// Header clicks select a column; a second click on it within
    /// [`DOUBLE_CLICK_WINDOW`] auto-fits it.
    fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(index) = self
            .host
            .header_column_at(self.table_area, mouse.column, mouse.row)
        else {
            return;
        };

        let is_double = matches!(
            self.last_click,
            Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        );

        self.host.select(index);
        if is_double {
            self.last_click = None;
            if let Some(id) = self.host.selected_column().map(|c| c.id.clone()) {
                debug!(column = %id, "Header double-click");
                let outcome = self.plugin.handle_header_double_click(&mut self.host, &id);
                self.record(&outcome);
            }
        } else {
            self.last_click = Some((index, now));
        }
    }

    /// Track the new terminal width and re-fit the columns to it.
    fn handle_resize(&mut self, width: u16, _height: u16) {
        if self.fixed_width {
            return;
        }
        self.host.set_available_cells(width);
        self.resize_all();
    }

    fn resize_all(&mut self) {
        let outcome = self.plugin.resize_all_columns(&mut self.host);
        self.record(&outcome);
    }

    fn record(&mut self, outcome: &PassOutcome) {
        self.notice = describe(outcome);
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let host = &self.host;
        let mut status = host.status_line(self.plugin.options().viewport_mode);
        if let Some(notice) = &self.notice {
            status.push_str(" | ");
            status.push_str(notice);
        }

        let mut table_area = Rect::default();
        self.terminal.draw(|frame| {
            table_area = render_frame(frame, host, &status);
        })?;
        self.table_area = table_area;
        Ok(())
    }
}

/// Draw the table and status bar. Returns the table area.
fn render_frame(frame: &mut Frame, host: &TableHost, status: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                    // Table
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(frame.area());

    host.render(frame, chunks[0]);

    let paragraph =
        Paragraph::new(Line::from(status.to_string())).style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, chunks[1]);

    chunks[0]
}

/// Short status text for passes that did not simply succeed.
fn describe(outcome: &PassOutcome) -> Option<String> {
    match outcome {
        PassOutcome::Applied(report) if !report.diagnostics.is_empty() => Some(format!(
            "{} column(s) misconfigured, see log",
            report.diagnostics.len()
        )),
        PassOutcome::Applied(_) => None,
        PassOutcome::Skipped(reason) => Some(match reason {
            SkipReason::Detached => "no terminal width yet".to_string(),
            SkipReason::DataUnavailable(err) => err.to_string(),
            SkipReason::UnknownColumn(name) => format!("no column {}", name),
            SkipReason::NotResizable(id) => format!("{} is not resizable", id),
            SkipReason::InvalidConfig(err) => err.to_string(),
        }),
    }
}

/// Initialize and run the TUI over `host`.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_host(
    host: TableHost,
    plugin: AutoColumnSize<MonospaceMeasurer>,
    key_bindings: KeyBindings,
    fixed_width: bool,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(host, plugin, key_bindings, fixed_width)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
