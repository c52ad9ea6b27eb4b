use std::io::{Write, stdout};

use anyhow::{Context, Result};
use base64::Engine;
use tracing::warn;

use crate::app::{App, Message, Model, ToastLevel};

impl App {
    /// Perform the I/O a message asks for after the model has been updated.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::Save) {
            match save_to_disk(model) {
                Ok(()) => {
                    model.editor.mark_saved();
                    model.show_toast(ToastLevel::Info, format!("Saved {}", model.file_path.display()));
                }
                Err(err) => {
                    warn!(path = %model.file_path.display(), "{err:#}");
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                }
            }
        }
        if let Some(text) = model.take_clipboard() {
            Self::copy_to_clipboard(model, &text);
        }
    }

    fn copy_to_clipboard(model: &mut Model, text: &str) {
        if text.is_empty() {
            return;
        }
        match copy_to_clipboard_osc52(text) {
            Ok(()) => {
                let chars = text.chars().count();
                model.show_toast(ToastLevel::Info, format!("Copied {chars} char(s)"));
            }
            Err(err) => model.show_toast(ToastLevel::Error, format!("Copy failed: {err}")),
        }
    }
}

fn save_to_disk(model: &Model) -> Result<()> {
    std::fs::write(&model.file_path, model.editor.text())
        .with_context(|| format!("failed to write {}", model.file_path.display()))
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Editor, EditorOptions};
    use crate::host::MemoryHost;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        let seq = osc52_sequence("hi");
        assert_eq!(seq, "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_save_writes_buffer_and_clears_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        let editor = Editor::new(
            MemoryHost::default(),
            EditorOptions::new().with_default_value("# saved"),
        );
        let mut model = Model::new(path.clone(), editor, (40, 10));
        model.editor.dispatch(crate::editor::Command::SetValue {
            value: "# changed".to_string(),
        });
        assert!(model.editor.is_dirty());

        App::handle_message_side_effects(&mut model, &Message::Save);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# changed");
        assert!(!model.editor.is_dirty());
        assert!(model.active_toast().is_some_and(|(_, level)| level == ToastLevel::Info));
    }

    #[test]
    fn test_save_failure_keeps_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("note.md");
        let mut model = Model::new(path, Editor::new(MemoryHost::default(), EditorOptions::new()), (40, 10));
        model.editor.dispatch(crate::editor::Command::SetValue {
            value: "x".to_string(),
        });
        App::handle_message_side_effects(&mut model, &Message::Save);
        assert!(model.editor.is_dirty());
        assert!(model.active_toast().is_some_and(|(_, level)| level == ToastLevel::Error));
    }
}
