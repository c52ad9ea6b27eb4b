use crate::app::Model;
use crate::editor::InputEvent;
use crate::host::{CaretMotion, Host};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Forward an input event to the editor
    Input(InputEvent),
    /// Move the caret natively, optionally extending the selection
    MoveCaret(CaretMotion, bool),
    /// Mouse press at a content row/column (relative to the screen)
    Click(usize, usize),
    /// Copy the selection to the clipboard
    Copy,

    // Navigation
    /// Scroll by n rows (negative is up)
    Scroll(isize),

    // File
    /// Write the buffer to disk
    Save,

    // System
    /// Run a deferred render if one is waiting
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Apply a message to the model.
///
/// Disk and terminal I/O live in the side-effect pass, not here.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Input(event) => {
            let follow_caret = !matches!(event, InputEvent::SelectionChange);
            let dispatch = model.editor.handle(event);
            if let Some(text) = dispatch.clipboard {
                model.set_clipboard(text);
            }
            if follow_caret {
                model.keep_caret_visible();
            }
        }
        Message::MoveCaret(motion, extend) => {
            model.editor.host_mut().move_caret(motion, extend);
            model.editor.handle(InputEvent::SelectionChange);
            model.keep_caret_visible();
        }
        Message::Click(row, col) => {
            let row = model.editor.host().viewport().scroll_top + row;
            let target = model.editor.host_mut().click(row, col);
            model.editor.handle(InputEvent::Click { target });
            model.editor.handle(InputEvent::SelectionChange);
        }
        Message::Copy => {
            if let Some(text) = model.selected_text() {
                model.set_clipboard(text);
            }
        }
        Message::Scroll(delta) => model.editor.host_mut().scroll_by(delta),
        Message::Tick => {
            model.editor.poll_render();
        }
        Message::Resize(width, height) => model.resize(width, height),
        Message::Quit => model.should_quit = true,
        Message::Save => {}
    }
    model
}
