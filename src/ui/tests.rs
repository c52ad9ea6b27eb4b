use super::*;
use crate::app::Model;
use crate::editor::{Command, Editor, EditorOptions, InputEvent, Key};
use crate::host::MemoryHost;
use crate::offset::TextOffset;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::{Color, Modifier};
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(40, 10);
    Terminal::new(backend).unwrap()
}

fn model(text: &str) -> Model {
    let editor = Editor::new(
        MemoryHost::default(),
        EditorOptions::new().with_default_value(text),
    );
    Model::new(PathBuf::from("notes.md"), editor, (40, 10))
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
}

fn draw(terminal: &mut Terminal<TestBackend>, model: &mut Model) {
    terminal.draw(|frame| render(model, frame)).unwrap();
}

#[test]
fn test_rows_render_after_padding() {
    let mut model = model("# Title\nbody text");
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    assert!(row_text(&terminal, 0).starts_with("  # Title"));
    assert!(row_text(&terminal, 1).starts_with("  body text"));
}

#[test]
fn test_heading_is_styled() {
    let mut model = model("# Title");
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    let cell = &terminal.backend().buffer()[(4, 0)];
    assert_eq!(cell.fg, Color::Cyan);
    assert!(cell.modifier.contains(Modifier::BOLD));
}

#[test]
fn test_status_bar_shows_file_and_caret() {
    let mut model = model("ab\ncd");
    model.editor.dispatch(Command::SetPosition {
        start: TextOffset::At(4),
        end: None,
    });
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    let status = row_text(&terminal, 9);
    assert!(status.contains("notes.md"));
    assert!(status.contains("Ln 2, Col 2"));
    assert!(!status.contains("[modified]"));
}

#[test]
fn test_status_bar_marks_modified_buffer() {
    let mut model = model("ab");
    model.editor.handle(InputEvent::key(Key::Char('x')));
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    assert!(row_text(&terminal, 9).contains("[modified]"));
    assert!(row_text(&terminal, 0).starts_with("  xab"));
}

#[test]
fn test_cursor_follows_caret() {
    let mut model = model("hello");
    model.editor.dispatch(Command::SetPosition {
        start: TextOffset::At(3),
        end: None,
    });
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    let cursor = terminal.get_cursor_position().unwrap();
    assert_eq!((cursor.x, cursor.y), (DOCUMENT_LEFT_PADDING + 3, 0));
}

#[test]
fn test_selection_is_highlighted() {
    let mut model = model("hello");
    model.editor.dispatch(Command::SetPosition {
        start: TextOffset::At(1),
        end: Some(TextOffset::At(3)),
    });
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(2, 0)].bg, Color::Reset);
    assert_eq!(buffer[(3, 0)].bg, Color::Blue);
    assert_eq!(buffer[(4, 0)].bg, Color::Blue);
    assert_eq!(buffer[(5, 0)].bg, Color::Reset);
}

#[test]
fn test_tabs_expand_to_tab_width() {
    let mut model = model("\tx");
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    assert!(row_text(&terminal, 0).starts_with("      x"));
}

#[test]
fn test_rows_scroll_with_viewport() {
    let text = (1..=30).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
    let mut model = model(&text);
    model.editor.host_mut().scroll_by(5);
    let mut terminal = create_test_terminal();
    draw(&mut terminal, &mut model);
    assert!(row_text(&terminal, 0).starts_with("  line 6"));
}
