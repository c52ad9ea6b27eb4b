//! Undo/redo history of whole-document snapshots.

use ropey::Rope;

/// A `(cursor position, text)` snapshot.
///
/// Ropes share structure, so keeping one per edit stays cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub position: usize,
    pub text: Rope,
}

/// Linear history with a cursor.
///
/// `index` points one past the last recorded edit. Recording truncates
/// everything from `index` on, so a new edit after an undo discards the
/// redoable states.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Record the state an edit is about to replace.
    pub fn record(&mut self, position: usize, text: Rope) {
        self.entries.truncate(self.index);
        self.entries.push(HistoryEntry { position, text });
        self.index += 1;
    }

    /// Step back, saving `current` so a redo can return to it.
    ///
    /// Returns the state to restore, or `None` at the start of history.
    pub fn undo(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        if self.index == 0 {
            return None;
        }
        if self.index >= self.entries.len() {
            self.entries.push(current);
        } else {
            self.entries[self.index] = current;
        }
        self.index -= 1;
        self.entries.get(self.index).cloned()
    }

    /// Step forward. Returns `None` at the end of history.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(position: usize, text: &str) -> HistoryEntry {
        HistoryEntry {
            position,
            text: Rope::from_str(text),
        }
    }

    #[test]
    fn test_empty_history_has_nothing_to_undo_or_redo() {
        let mut history = HistoryStack::new();
        assert!(history.undo(entry(0, "x")).is_none());
        assert!(history.redo().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_saves_current_state_for_redo() {
        let mut history = HistoryStack::new();
        history.record(0, Rope::from_str(""));
        let restored = history.undo(entry(1, "a")).unwrap();
        assert_eq!(restored, entry(0, ""));
        assert_eq!(history.len(), 2);
        let again = history.redo().unwrap();
        assert_eq!(again, entry(1, "a"));
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_record_after_undo_discards_redo_states() {
        let mut history = HistoryStack::new();
        history.record(0, Rope::from_str(""));
        history.record(1, Rope::from_str("a"));
        history.undo(entry(2, "ab"));
        history.record(1, Rope::from_str("a"));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_in_the_middle_overwrites_slot() {
        let mut history = HistoryStack::new();
        history.record(0, Rope::from_str(""));
        history.record(1, Rope::from_str("a"));
        history.undo(entry(2, "ab"));
        let restored = history.undo(entry(5, "a")).unwrap();
        assert_eq!(restored, entry(0, ""));
        assert_eq!(history.redo().unwrap(), entry(5, "a"));
        assert_eq!(history.len(), 3);
    }
}
