//! Input event handling.

use tracing::{debug, warn};

use super::events::{Dispatch, HookOutcome, InputEvent, Key, KeyInput};
use super::Editor;
use crate::dom::NodeId;
use crate::host::Host;
use crate::offset::{self, Position};

/// Clipboard text uses CRLF on some platforms; the document is LF only.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

impl<H: Host> Editor<H> {
    /// Handle one input event.
    ///
    /// A hook registered for the event's kind runs first; if it reports
    /// [`HookOutcome::Handled`] the editor leaves the event alone and reports
    /// it as prevented.
    pub fn handle(&mut self, event: InputEvent) -> Dispatch {
        if let Some(hook) = self.hooks.get_mut(&event.kind()) {
            if hook(&event) == HookOutcome::Handled {
                return Dispatch::prevented();
            }
        }
        let dispatch = match event {
            InputEvent::KeyDown(input) => self.key_down(input),
            InputEvent::Paste(text) => {
                self.insert(&normalize_newlines(&text));
                Dispatch::prevented()
            }
            InputEvent::Cut => self.cut(),
            InputEvent::DragStart(text) => {
                self.drag_text = Some(text);
                Dispatch::default()
            }
            InputEvent::Drop { text, target } => self.drop_text(&text, target),
            InputEvent::CompositionStart => {
                self.composition.start();
                Dispatch::default()
            }
            InputEvent::CompositionUpdate(data) => {
                self.composition.update(data);
                Dispatch::default()
            }
            InputEvent::CompositionEnd => {
                self.composition_end();
                Dispatch::default()
            }
            InputEvent::Click { target } => {
                self.click(target);
                Dispatch::default()
            }
            InputEvent::SelectionChange => {
                let (start, _) = self.selection();
                self.store.set_position(start);
                Dispatch::default()
            }
        };
        self.after_change();
        dispatch
    }

    fn key_down(&mut self, input: KeyInput) -> Dispatch {
        if self.composition.active || input.is_composing {
            if input.key == Key::Enter {
                self.composition.active = false;
            }
            return Dispatch::default();
        }
        let modifiers = input.modifiers;
        match input.key {
            Key::Char(c) if modifiers.ctrl && !modifiers.shift && c.eq_ignore_ascii_case(&'z') => {
                self.store.undo();
                Dispatch::prevented()
            }
            Key::Char(c) if modifiers.ctrl && !modifiers.shift && c.eq_ignore_ascii_case(&'y') => {
                self.store.redo();
                Dispatch::prevented()
            }
            Key::Char(c) if !modifiers.ctrl && !modifiers.alt => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                Dispatch::prevented()
            }
            Key::Tab => {
                self.insert("\t");
                Dispatch::prevented()
            }
            Key::Enter => {
                let (start, _) = self.selection();
                if start == self.store.len_chars() {
                    self.insert("\n\n");
                    self.store.set_position(self.store.position().saturating_sub(1));
                } else {
                    self.insert("\n");
                }
                Dispatch::prevented()
            }
            Key::Backspace => {
                let (start, end) = self.selection();
                let from = start.saturating_sub(1);
                let to = end.min(self.store.len_chars());
                self.store.delete_text(from, to);
                self.store.set_position(from);
                Dispatch::prevented()
            }
            Key::Delete => {
                let (start, end) = self.selection();
                let to = if start == end { end + 1 } else { end };
                self.store.delete_text(start, to);
                self.store.set_position(start);
                Dispatch::prevented()
            }
            Key::Char(_) | Key::Other => Dispatch::default(),
        }
    }

    fn cut(&mut self) -> Dispatch {
        let (start, end) = self.selection();
        let text = self.store.slice(start, end);
        self.store.delete_text(start, end);
        self.store.set_position(start);
        Dispatch {
            prevented: true,
            clipboard: Some(text),
        }
    }

    fn drop_text(&mut self, text: &str, target: Position) -> Dispatch {
        let tree = self.host.tree();
        if !tree.contains(target.node) || !tree.is_content_editable(target.node) {
            return Dispatch::default();
        }
        let (start, end) = self.selection();
        if let Err(err) = self.host.select(target, target) {
            warn!(%err, "could not move the caret to the drop point");
            return Dispatch::default();
        }
        let insertion = self.selection();
        let text = normalize_newlines(text);
        if let Err(err) = self.store.delete_insert_text(&text, insertion, start, end) {
            warn!(%err, "drop rejected");
        }
        Dispatch::prevented()
    }

    fn composition_end(&mut self) {
        if !self.composition.active {
            return;
        }
        let Some(pending) = self.composition.pending.take() else {
            return;
        };
        if let Some(focus) = self.host.selection().map(|selection| selection.focus) {
            let len = pending.chars().count();
            match self.strategy.native_range(focus.offset, len) {
                Some((start, end)) => {
                    let range = (Position::new(focus.node, start), Position::new(focus.node, end));
                    if let Err(err) = self.host.delete_contents(range.0, range.1) {
                        warn!(%err, "could not remove native composition text");
                    }
                }
                None => warn!(offset = focus.offset, len, "composition range starts before the node"),
            }
        }
        self.insert(&pending);
        if self.strategy.ends_on_composition_end() {
            self.composition.active = false;
        }
        self.composition.sessions += 1;
        debug!(sessions = self.composition.sessions, "committed composition");
    }

    fn click(&mut self, target: NodeId) {
        if target == self.host.tree().root() {
            self.host.focus();
            self.caret_to_end();
        }
    }

    /// Logical offset of a host position, for callers translating pointer input.
    pub fn offset_of(&self, position: Position) -> usize {
        let tree = self.host.tree();
        offset::node_to_offset(tree, tree.root(), position)
    }
}
