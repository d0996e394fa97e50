//! Event handling tests for the table viewer.

use super::*;
use crate::model::{ColumnId, ColumnSpec, Row, RowDataset};
use crate::sizing::{GridHost, PluginOptions, ViewportMode, WidthSource};
use crate::test_harness::buffer_to_string;
use ratatui::backend::TestBackend;
use std::time::Duration;

fn create_test_app(mode: ViewportMode) -> TuiApp<TestBackend> {
    let columns = vec![
        ColumnSpec::new(ColumnId::new("id").unwrap()).with_width(10),
        ColumnSpec::new(ColumnId::new("name").unwrap()).with_width(10),
    ];
    let data: RowDataset = vec![
        Row::new().with("id", 1i64).with("name", "Al"),
        Row::new().with("id", 2i64).with("name", "Alexandria"),
    ]
    .into_iter()
    .collect();
    let host = TableHost::new(columns, data, 40);

    let options = PluginOptions {
        viewport_mode: mode,
        ..Default::default()
    };
    let plugin = AutoColumnSize::new(options, MonospaceMeasurer::terminal_cells());

    let terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    TuiApp::with_terminal(terminal, host, plugin, KeyBindings::default(), false)
}

fn widths(app: &TuiApp<TestBackend>) -> Vec<u32> {
    app.host().columns().iter().map(|c| c.width).collect()
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn left_click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn ctrl_shift_a_resizes_all_columns() {
    let mut app = create_test_app(ViewportMode::Independent);

    let quit = app.handle_key(key(
        KeyCode::Char('A'),
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    ));

    assert!(!quit);
    assert_eq!(widths(&app), vec![3, 11]);
}

#[test]
fn quit_keys() {
    let mut app = create_test_app(ViewportMode::Independent);
    assert!(app.handle_key(key(KeyCode::Char('q'), KeyModifiers::NONE)));
    assert!(app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE)));
    assert!(app.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!app.handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE)));
}

#[test]
fn enter_remeasures_selected_column() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.resize_all();

    app.handle_key(key(KeyCode::Right, KeyModifiers::NONE));
    app.handle_key(key(KeyCode::Enter, KeyModifiers::NONE));

    assert_eq!(app.host().selected(), 1);
    assert_eq!(widths(&app), vec![3, 11]);
    let report = app.host().last_report().unwrap();
    assert_eq!(report.resolved[0].source, WidthSource::Cached);
    assert_eq!(report.resolved[1].source, WidthSource::Measured);
}

#[test]
fn cycling_mode_refits_to_viewport() {
    let mut app = create_test_app(ViewportMode::Independent);

    app.handle_key(key(KeyCode::Char('m'), KeyModifiers::NONE));

    assert_eq!(
        app.plugin.options().viewport_mode,
        ViewportMode::FitColsToViewport
    );
    // 40 cells minus one cell of spacing
    assert_eq!(widths(&app).iter().sum::<u32>(), 39);
}

#[test]
fn header_double_click_resizes_clicked_column() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.draw().unwrap();
    let start = Instant::now();

    app.handle_mouse_at(left_click(12, 0), start);
    assert_eq!(app.host().selected(), 1);
    assert_eq!(widths(&app), vec![10, 10]);

    app.handle_mouse_at(left_click(13, 0), start + Duration::from_millis(150));
    assert_eq!(widths(&app), vec![3, 11]);
    assert_eq!(
        app.host().last_report().map(|r| r.resolved[1].source),
        Some(WidthSource::Measured)
    );
}

#[test]
fn slow_clicks_are_not_a_double_click() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.draw().unwrap();
    let start = Instant::now();

    app.handle_mouse_at(left_click(12, 0), start);
    app.handle_mouse_at(left_click(12, 0), start + DOUBLE_CLICK_WINDOW * 2);

    assert_eq!(widths(&app), vec![10, 10]);
}

#[test]
fn clicks_on_different_columns_are_not_a_double_click() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.draw().unwrap();
    let start = Instant::now();

    app.handle_mouse_at(left_click(2, 0), start);
    app.handle_mouse_at(left_click(12, 0), start + Duration::from_millis(50));

    assert_eq!(app.host().selected(), 1);
    assert_eq!(widths(&app), vec![10, 10]);
}

#[test]
fn body_clicks_are_ignored() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.draw().unwrap();
    let start = Instant::now();

    app.handle_mouse_at(left_click(12, 1), start);
    app.handle_mouse_at(left_click(12, 1), start);

    assert_eq!(app.host().selected(), 0);
    assert_eq!(widths(&app), vec![10, 10]);
}

#[test]
fn resize_event_refits_unless_width_is_fixed() {
    let mut app = create_test_app(ViewportMode::FitColsToViewport);
    app.handle_resize(61, 6);
    assert_eq!(widths(&app).iter().sum::<u32>(), 60);

    app.fixed_width = true;
    app.handle_resize(21, 6);
    assert_eq!(app.host().available_cells(), 61);
}

#[test]
fn non_resizable_target_is_reported_in_status() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.host.columns_mut()[0].resizable = false;

    app.handle_key(key(KeyCode::Enter, KeyModifiers::NONE));
    app.draw().unwrap();

    assert_eq!(app.notice.as_deref(), Some("id is not resizable"));
    let screen = buffer_to_string(app.terminal.backend().buffer());
    assert!(screen.contains("Independent"), "got:\n{}", screen);
}

#[test]
fn draw_renders_table_and_status() {
    let mut app = create_test_app(ViewportMode::Independent);
    app.resize_all();
    app.draw().unwrap();

    let screen = buffer_to_string(app.terminal.backend().buffer());
    let lines: Vec<&str> = screen.lines().collect();
    assert_eq!(lines[0], "id  name");
    assert_eq!(lines[2], "2   Alexandria");
    assert!(lines[3].starts_with(" Independent | id |"), "got: {}", lines[3]);
}
