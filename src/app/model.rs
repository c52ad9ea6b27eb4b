use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::{Command, CommandOutput, Editor, EditorOptions};
use crate::host::{Host, MemoryHost, ScrollBehavior};
use crate::selection;

/// Rows taken by the status bar at the bottom of the screen.
pub(super) const FOOTER_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The editor and its in-memory surface
    pub editor: Editor<MemoryHost>,
    /// File the buffer is saved to
    pub file_path: PathBuf,
    /// Terminal size (columns, rows)
    pub size: (u16, u16),
    /// Set when the loop should exit
    pub should_quit: bool,
    toast: Option<Toast>,
    clipboard: Option<String>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(
            PathBuf::from("untitled.md"),
            Editor::new(MemoryHost::default(), EditorOptions::default()),
            (80, 24),
        )
    }
}

impl Model {
    /// Create a model around `editor`, sizing its surface to the terminal.
    pub fn new(file_path: PathBuf, mut editor: Editor<MemoryHost>, size: (u16, u16)) -> Self {
        editor
            .host_mut()
            .set_client_height(usize::from(size.1.saturating_sub(FOOTER_ROWS)));
        Self {
            editor,
            file_path,
            size,
            should_quit: false,
            toast: None,
            clipboard: None,
        }
    }

    /// Rows available to the document.
    pub const fn content_height(&self) -> u16 {
        self.size.1.saturating_sub(FOOTER_ROWS)
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let rows = usize::from(self.content_height());
        self.editor.host_mut().set_client_height(rows);
    }

    /// 1-based line and 0-based column of the caret.
    pub fn caret_line(&mut self) -> (usize, usize) {
        match self.editor.dispatch(Command::GetLine) {
            CommandOutput::Line { line, column } => (line, column),
            _ => (1, 0),
        }
    }

    /// Text of the current selection, if it is not empty.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = selection::get_position(self.editor.host());
        (start < end).then(|| self.editor.store().slice(start, end))
    }

    /// Scroll just enough to keep the caret row on screen.
    pub(super) fn keep_caret_visible(&mut self) {
        let host = self.editor.host_mut();
        let Some((row, _)) = host.caret_cell() else {
            return;
        };
        let viewport = host.viewport();
        if row < viewport.scroll_top {
            host.scroll_to(row, ScrollBehavior::Instant);
        } else if row >= viewport.bottom() {
            host.scroll_to(row + 1 - viewport.client_height, ScrollBehavior::Instant);
        }
    }

    pub(super) fn set_clipboard(&mut self, text: String) {
        self.clipboard = Some(text);
    }

    /// Clipboard text waiting to be written to the terminal.
    pub(super) const fn take_clipboard(&mut self) -> Option<String> {
        self.clipboard.take()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
