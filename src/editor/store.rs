//! The logical document: text, cursor position and history.

use ropey::Rope;
use thiserror::Error;

use super::history::{HistoryEntry, HistoryStack};
use crate::offset::TextOffset;

/// Called with the new text whenever an edit, undo or redo happens.
pub type UpdateListener = Box<dyn FnMut(&str)>;

/// Rejected edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("drop at {target:?} lands inside the dragged range {dragged:?}")]
    OverlappingDrop {
        target: (usize, usize),
        dragged: (usize, usize),
    },
}

/// Owns the document text and everything tied to it.
///
/// Offsets are char offsets. `position` may be one past the end, which
/// places the caret at the very end of the document.
pub struct DocumentStore {
    rope: Rope,
    position: usize,
    history: HistoryStack,
    controlled: bool,
    dirty: bool,
    revision: u64,
    listener: Option<UpdateListener>,
}

impl DocumentStore {
    /// A store that owns its text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            position: 0,
            history: HistoryStack::new(),
            controlled: false,
            dirty: false,
            revision: 0,
            listener: None,
        }
    }

    /// A store whose text is owned by the caller.
    ///
    /// Edits are reported to the listener but only take effect once the
    /// caller feeds the value back through [`sync_controlled`](Self::sync_controlled).
    pub fn controlled(value: &str) -> Self {
        Self {
            controlled: true,
            ..Self::new(value)
        }
    }

    pub fn set_listener(&mut self, listener: UpdateListener) {
        self.listener = Some(listener);
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    /// Move the stored cursor, clamped to one past the end.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.len_chars() + 1);
    }

    pub const fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub const fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Whether the text changed since creation or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Bumped every time the text is replaced.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn notify(&mut self, text: &str) {
        if let Some(listener) = self.listener.as_mut() {
            listener(text);
        }
    }

    fn replace(&mut self, text: Rope) {
        self.rope = text;
        self.revision += 1;
    }

    /// Replace the text as one undoable edit.
    ///
    /// Every call records a history entry, even when `text` equals the
    /// current text, so `n` pushes are always undone by `n` undos.
    pub fn push_text(&mut self, text: &str) {
        self.history.record(self.position, self.rope.clone());
        if self.rope != text {
            if !self.controlled {
                self.replace(Rope::from_str(text));
            }
            self.dirty = true;
        }
        self.notify(text);
    }

    fn restore(&mut self, entry: HistoryEntry) {
        self.position = entry.position;
        let text = entry.text.to_string();
        if !self.controlled {
            self.replace(entry.text);
        }
        self.dirty = true;
        self.notify(&text);
    }

    /// Step back in history. Returns `false` at the start of history.
    pub fn undo(&mut self) -> bool {
        let current = HistoryEntry {
            position: self.position,
            text: self.rope.clone(),
        };
        match self.history.undo(current) {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Step forward in history. Returns `false` at the end of history.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    fn spliced(&self, start: usize, end: usize, text: &str) -> Rope {
        let len = self.len_chars();
        let start = start.min(len);
        let end = end.min(len).max(start);
        let mut rope = self.rope.clone();
        rope.remove(start..end);
        rope.insert(start, text);
        rope
    }

    /// Replace a range with `text` and move the cursor after it.
    ///
    /// `start` defaults to the selection start, `End` meaning one past the
    /// end. `end` defaults to the selection end when `start` is absent and
    /// to `start` otherwise, `End` meaning the end.
    pub fn insert_text(
        &mut self,
        text: &str,
        start: Option<TextOffset>,
        end: Option<TextOffset>,
        selection: (usize, usize),
    ) {
        let len = self.len_chars();
        let start_pos = match start {
            Some(TextOffset::At(offset)) => offset,
            Some(TextOffset::End) => len + 1,
            None => selection.0,
        };
        let end_pos = match (end, start) {
            (Some(TextOffset::At(offset)), _) => offset,
            (Some(TextOffset::End), _) => len,
            (None, Some(_)) => start_pos,
            (None, None) => selection.1,
        };
        let rope = self.spliced(start_pos, end_pos, text);
        let new_len = rope.len_chars();
        self.push_text(&rope.to_string());
        self.position = (start_pos + text.chars().count()).min(new_len + 1);
    }

    /// Move `text` to the insertion point `selection`, removing the dragged
    /// range `[start, end)`.
    ///
    /// Whichever of the two edits comes later in the document is applied
    /// first, so offsets of the other stay valid.
    pub fn delete_insert_text(
        &mut self,
        text: &str,
        selection: (usize, usize),
        start: usize,
        end: usize,
    ) -> Result<(), EditError> {
        let inserted = text.chars().count();
        let len = self.len_chars();
        let (from, to) = (start.min(end).min(len), start.max(end).min(len));
        let (rope, position) = if selection.1 <= from {
            let mut rope = self.rope.clone();
            rope.remove(from..to);
            let at = selection.0.min(rope.len_chars());
            rope.remove(at..selection.1.min(rope.len_chars()).max(at));
            rope.insert(at, text);
            (rope, selection.0 + inserted)
        } else if selection.0 >= to {
            let mut rope = self.spliced(selection.0, selection.1, text);
            let len = rope.len_chars();
            rope.remove(from.min(len)..to.min(len));
            (rope, (selection.0 + inserted).saturating_sub(to - from))
        } else {
            return Err(EditError::OverlappingDrop {
                target: selection,
                dragged: (from, to),
            });
        };
        self.push_text(&rope.to_string());
        self.position = position.min(self.len_chars() + 1);
        Ok(())
    }

    /// Remove `[start, end)`.
    pub fn delete_text(&mut self, start: usize, end: usize) {
        let rope = self.spliced(start, end, "");
        self.push_text(&rope.to_string());
    }

    /// Text in `[start, end)`, clamped.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.len_chars();
        let start = start.min(len);
        let end = end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// 1-based line and 0-based column of a char offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len_chars());
        let line = self.rope.char_to_line(offset);
        (line + 1, offset - self.rope.line_to_char(line))
    }

    /// Take the caller-owned value of a controlled store.
    ///
    /// Calling this on a store that owns its text hands ownership to the
    /// caller from then on.
    pub fn sync_controlled(&mut self, value: &str) {
        self.controlled = true;
        if self.rope != value {
            self.replace(Rope::from_str(value));
        }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("rope", &format_args!("Rope({} lines)", self.rope.len_lines()))
            .field("position", &self.position)
            .field("history", &self.history.len())
            .field("controlled", &self.controlled)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // --- push_text / history ---

    #[test]
    fn test_push_text_records_previous_state() {
        let mut store = DocumentStore::new("a");
        store.set_position(1);
        store.push_text("ab");
        assert_eq!(store.text(), "ab");
        assert_eq!(store.history().len(), 1);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_push_same_text_still_records_history() {
        let mut store = DocumentStore::new("same");
        store.push_text("same");
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.revision(), 0);
        assert!(!store.is_dirty());
        assert!(store.undo());
        assert_eq!(store.text(), "same");
        assert!(!store.undo());
    }

    #[test]
    fn test_repeated_pushes_undo_one_at_a_time() {
        let mut store = DocumentStore::new("w");
        store.push_text("x");
        store.push_text("a");
        store.push_text("a");
        assert!(store.undo());
        assert_eq!(store.text(), "a");
        assert!(store.undo());
        assert_eq!(store.text(), "x");
        assert!(store.undo());
        assert_eq!(store.text(), "w");
    }

    #[test]
    fn test_undo_redo_sequence() {
        let mut store = DocumentStore::new("");
        store.push_text("a");
        store.push_text("ab");
        store.push_text("abc");
        assert!(store.undo());
        assert!(store.undo());
        assert_eq!(store.text(), "a");
        assert!(store.redo());
        assert_eq!(store.text(), "ab");
    }

    #[test]
    fn test_undo_restores_position() {
        let mut store = DocumentStore::new("hello");
        store.insert_text("X", Some(TextOffset::At(2)), None, (0, 0));
        assert_eq!(store.position(), 3);
        store.undo();
        assert_eq!(store.text(), "hello");
        assert_eq!(store.position(), 0);
    }

    #[test]
    fn test_history_boundaries_are_noops() {
        let mut store = DocumentStore::new("x");
        assert!(!store.undo());
        store.push_text("xy");
        assert!(!store.redo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.text(), "x");
    }

    #[test]
    fn test_listener_sees_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut store = DocumentStore::new("");
        store.set_listener(Box::new(move |text| sink.borrow_mut().push(text.to_string())));
        store.push_text("a");
        store.undo();
        store.redo();
        assert_eq!(*seen.borrow(), vec!["a", "", "a"]);
    }

    // --- insert_text ---

    #[test]
    fn test_insert_at_explicit_range() {
        let mut store = DocumentStore::new("hello");
        store.insert_text("X", Some(TextOffset::At(2)), Some(TextOffset::At(2)), (0, 0));
        assert_eq!(store.text(), "heXllo");
        assert_eq!(store.position(), 3);
    }

    #[test]
    fn test_insert_replaces_selection_by_default() {
        let mut store = DocumentStore::new("hello");
        store.insert_text("J", None, None, (0, 1));
        assert_eq!(store.text(), "Jello");
        assert_eq!(store.position(), 1);
    }

    #[test]
    fn test_insert_with_start_only_is_collapsed() {
        let mut store = DocumentStore::new("hello");
        store.insert_text("-", Some(TextOffset::At(1)), None, (0, 5));
        assert_eq!(store.text(), "h-ello");
    }

    #[test]
    fn test_insert_at_end_sentinel_appends() {
        let mut store = DocumentStore::new("abc");
        store.insert_text("!", Some(TextOffset::End), None, (0, 0));
        assert_eq!(store.text(), "abc!");
        assert_eq!(store.position(), 5);
    }

    #[test]
    fn test_insert_clamps_reversed_and_overflowing_ranges() {
        let mut store = DocumentStore::new("abc");
        store.insert_text("X", Some(TextOffset::At(2)), Some(TextOffset::At(1)), (0, 0));
        assert_eq!(store.text(), "abXc");
        store.insert_text("Y", Some(TextOffset::At(40)), Some(TextOffset::At(50)), (0, 0));
        assert_eq!(store.text(), "abXcY");
        assert_eq!(store.position(), 6);
    }

    #[test]
    fn test_insert_then_delete_restores_text() {
        let mut store = DocumentStore::new("héllo");
        store.insert_text("wörld ", Some(TextOffset::At(0)), None, (0, 0));
        store.delete_text(0, 6);
        assert_eq!(store.text(), "héllo");
    }

    // --- delete_insert_text ---

    #[test]
    fn test_drop_after_dragged_range() {
        let mut store = DocumentStore::new("abcdef");
        store.delete_insert_text("X", (5, 5), 0, 3).unwrap();
        assert_eq!(store.text(), "deXf");
        assert_eq!(store.position(), 3);
    }

    #[test]
    fn test_drop_before_dragged_range() {
        let mut store = DocumentStore::new("abcdef");
        store.delete_insert_text("ef", (1, 1), 4, 6).unwrap();
        assert_eq!(store.text(), "aefbcd");
        assert_eq!(store.position(), 3);
    }

    #[test]
    fn test_drop_with_reversed_source_range() {
        let mut store = DocumentStore::new("abcdef");
        store.delete_insert_text("X", (5, 5), 3, 0).unwrap();
        assert_eq!(store.text(), "deXf");
        assert_eq!(store.position(), 3);
    }

    #[test]
    fn test_drop_with_source_range_past_end_is_clamped() {
        let mut store = DocumentStore::new("abcdef");
        store.delete_insert_text("X", (2, 2), 4, 40).unwrap();
        assert_eq!(store.text(), "abXcd");
        assert_eq!(store.position(), 3);

        let mut store = DocumentStore::new("abcdef");
        store.delete_insert_text("X", (1, 1), 3, 40).unwrap();
        assert_eq!(store.text(), "aXbc");
        assert_eq!(store.position(), 2);

        let mut store = DocumentStore::new("abcdef");
        store.delete_insert_text("X", (6, 6), 2, 40).unwrap();
        assert_eq!(store.text(), "abX");
        assert_eq!(store.position(), 3);
    }

    #[test]
    fn test_drop_inside_dragged_range_is_rejected() {
        let mut store = DocumentStore::new("abcdef");
        let err = store.delete_insert_text("bcd", (2, 2), 1, 4).unwrap_err();
        assert_eq!(
            err,
            EditError::OverlappingDrop {
                target: (2, 2),
                dragged: (1, 4)
            }
        );
        assert_eq!(store.text(), "abcdef");
        assert_eq!(store.history().len(), 0);
    }

    // --- controlled ---

    #[test]
    fn test_controlled_store_waits_for_value() {
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let mut store = DocumentStore::controlled("abc");
        store.set_listener(Box::new(move |text| *sink.borrow_mut() = text.to_string()));
        store.insert_text("X", Some(TextOffset::At(3)), None, (0, 0));
        assert_eq!(store.text(), "abc");
        assert_eq!(*seen.borrow(), "abcX");
        store.sync_controlled("abcX");
        assert_eq!(store.text(), "abcX");
        assert_eq!(store.revision(), 1);
    }

    // --- queries ---

    #[test]
    fn test_line_col() {
        let store = DocumentStore::new("ab\ncde\n");
        assert_eq!(store.line_col(0), (1, 0));
        assert_eq!(store.line_col(2), (1, 2));
        assert_eq!(store.line_col(3), (2, 0));
        assert_eq!(store.line_col(5), (2, 2));
        assert_eq!(store.line_col(99), (3, 0));
    }

    #[test]
    fn test_position_is_clamped_past_end() {
        let mut store = DocumentStore::new("ab");
        store.set_position(10);
        assert_eq!(store.position(), 3);
    }

    #[test]
    fn test_debug_shows_line_count() {
        let store = DocumentStore::new("a\nb");
        assert!(format!("{store:?}").contains("Rope(2 lines)"));
    }
}
