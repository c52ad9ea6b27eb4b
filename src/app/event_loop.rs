use std::io::{ErrorKind, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::app::{App, Message, Model, update};
use crate::editor::{Editor, EditorOptions};
use crate::host::MemoryHost;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let text = read_document(&self.file_path)?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - markedit requires an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;

        let mut model = Model::new(self.file_path.clone(), self.editor(&text), (size.width, size.height));

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Build the editor with this app's options.
    pub(super) fn editor(&self, text: &str) -> Editor<MemoryHost> {
        let options = EditorOptions::new()
            .with_default_value(text)
            .with_engine(self.engine)
            .with_render_mode(self.render_mode)
            .with_scroll_margin(self.scroll_margin);
        Editor::new(MemoryHost::default(), options)
    }

    fn apply(model: &mut Model, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if model.editor.render_driver().is_pending() {
                Self::apply(model, Message::Tick);
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(event::read()?, model) {
                    debug!(frame = frame_idx, ?msg, "event.message");
                    Self::apply(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(event::read()?, model) {
                        Self::apply(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                frame_idx += 1;
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

/// Read the file to edit; a file that does not exist yet starts empty.
fn read_document(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_document(&dir.path().join("new.md")).unwrap(), "");
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# hi\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "# hi\n");
    }

    #[test]
    fn test_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_document(dir.path()).is_err());
    }
}
