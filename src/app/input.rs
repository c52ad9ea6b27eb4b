use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::editor::{InputEvent, Key, KeyInput, Modifiers};
use crate::host::CaretMotion;

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

impl App {
    pub(super) fn handle_event(event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Paste(text) => Some(Message::Input(InputEvent::Paste(text))),
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let modifiers = Modifiers { ctrl, shift, alt };
        let editor_key = |key: Key| {
            Some(Message::Input(InputEvent::KeyDown(
                KeyInput::new(key).with_modifiers(modifiers),
            )))
        };
        let page = isize::try_from(model.content_height()).unwrap_or(isize::MAX);

        match key.code {
            KeyCode::Char('q') if ctrl => Some(Message::Quit),
            KeyCode::Esc => Some(Message::Quit),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('x') if ctrl => Some(Message::Input(InputEvent::Cut)),
            KeyCode::Char('c') if ctrl => Some(Message::Copy),
            KeyCode::Char(c) => editor_key(Key::Char(c)),
            KeyCode::Enter => editor_key(Key::Enter),
            KeyCode::Tab => editor_key(Key::Tab),
            KeyCode::Backspace => editor_key(Key::Backspace),
            KeyCode::Delete => editor_key(Key::Delete),
            KeyCode::Left => Some(Message::MoveCaret(CaretMotion::Left, shift)),
            KeyCode::Right => Some(Message::MoveCaret(CaretMotion::Right, shift)),
            KeyCode::Up => Some(Message::MoveCaret(CaretMotion::Up, shift)),
            KeyCode::Down => Some(Message::MoveCaret(CaretMotion::Down, shift)),
            KeyCode::Home if ctrl => Some(Message::MoveCaret(CaretMotion::DocumentStart, shift)),
            KeyCode::End if ctrl => Some(Message::MoveCaret(CaretMotion::DocumentEnd, shift)),
            KeyCode::Home => Some(Message::MoveCaret(CaretMotion::LineStart, shift)),
            KeyCode::End => Some(Message::MoveCaret(CaretMotion::LineEnd, shift)),
            KeyCode::PageUp => Some(Message::Scroll(-page)),
            KeyCode::PageDown => Some(Message::Scroll(page)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if mouse.row < model.content_height() => {
                let col = mouse.column.saturating_sub(crate::ui::DOCUMENT_LEFT_PADDING);
                Some(Message::Click(usize::from(mouse.row), usize::from(col)))
            }
            MouseEventKind::ScrollUp => Some(Message::Scroll(-WHEEL_ROWS)),
            MouseEventKind::ScrollDown => Some(Message::Scroll(WHEEL_ROWS)),
            _ => None,
        }
    }
}
