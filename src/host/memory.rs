//! In-memory host backed by a row layout.
//!
//! Used by the terminal front end, the headless script runner and tests.
//! Element boxes are measured in rows of the [`RowLayout`].

use tracing::trace;

use super::{Host, NodeBox, RangeError, ScrollBehavior, Selection, Viewport};
use crate::dom::{NodeData, NodeId, RowLayout, VisualTree};
use crate::offset::{self, Position, TextOffset};

/// Native caret movements a host performs on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMotion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// A host whose surface lives entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    tree: VisualTree,
    layout: RowLayout,
    selection: Option<Selection>,
    focused: bool,
    caret_visible: bool,
    scroll_top: usize,
    client_height: usize,
    last_scroll: Option<(usize, ScrollBehavior)>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(24)
    }
}

impl MemoryHost {
    /// Create a host with an empty surface and a viewport `client_height` rows tall.
    pub fn new(client_height: usize) -> Self {
        let tree = VisualTree::new();
        let layout = RowLayout::compute(&tree);
        Self {
            tree,
            layout,
            selection: None,
            focused: false,
            caret_visible: true,
            scroll_top: 0,
            client_height,
            last_scroll: None,
        }
    }

    pub const fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub const fn caret_visible(&self) -> bool {
        self.caret_visible
    }

    pub const fn set_client_height(&mut self, height: usize) {
        self.client_height = height;
    }

    /// Scroll without recording it as a programmatic scroll (user wheel).
    pub fn scroll_by(&mut self, delta: isize) {
        let top = self.scroll_top.saturating_add_signed(delta);
        self.scroll_top = top.min(self.max_scroll());
    }

    /// The most recent programmatic scroll, if any.
    pub const fn last_scroll(&self) -> Option<(usize, ScrollBehavior)> {
        self.last_scroll
    }

    fn max_scroll(&self) -> usize {
        self.layout.row_count().saturating_sub(self.client_height)
    }

    fn relayout(&mut self) {
        self.layout = RowLayout::compute(&self.tree);
    }

    /// Row and char column of the caret.
    pub fn caret_cell(&self) -> Option<(usize, usize)> {
        let selection = self.selection?;
        self.layout.locate(&self.tree, selection.focus)
    }

    /// Place the caret under a content row/column, as a mouse press would.
    ///
    /// Returns the node that was hit; the root container when no text is
    /// under the pointer.
    pub fn click(&mut self, row: usize, col: usize) -> NodeId {
        self.focused = true;
        match self.layout.hit_test(row, col) {
            Some(position) => {
                self.selection = Some(Selection::caret(position));
                position.node
            }
            None => self.tree.root(),
        }
    }

    /// Move or extend the selection the way a native caret would.
    pub fn move_caret(&mut self, motion: CaretMotion, extend: bool) {
        let root = self.tree.root();
        let Some(current) = self.selection else {
            let start = offset::resolve(&self.tree, root, TextOffset::At(0), true);
            self.selection = Some(Selection::caret(start));
            return;
        };
        let focus = current.focus;
        let target = match motion {
            CaretMotion::Left | CaretMotion::Right => {
                let logical = offset::node_to_offset(&self.tree, root, focus);
                let next = if motion == CaretMotion::Left {
                    logical.saturating_sub(1)
                } else {
                    logical + 1
                };
                Some(offset::resolve(&self.tree, root, TextOffset::At(next), true))
            }
            CaretMotion::Up | CaretMotion::Down | CaretMotion::LineStart | CaretMotion::LineEnd => {
                self.layout.locate(&self.tree, focus).and_then(|(row, col)| {
                    let x = self.layout.display_col(row, col);
                    match motion {
                        CaretMotion::Up => row.checked_sub(1).and_then(|up| self.layout.hit_test(up, x)),
                        CaretMotion::Down => self.layout.hit_test(row + 1, x),
                        CaretMotion::LineStart => self.layout.hit_test(row, 0),
                        _ => self.layout.hit_test(row, usize::MAX),
                    }
                })
            }
            CaretMotion::DocumentStart => Some(offset::resolve(&self.tree, root, TextOffset::At(0), true)),
            CaretMotion::DocumentEnd => Some(offset::last_position(&self.tree, root)),
        };
        let Some(target) = target else {
            return;
        };
        let anchor = if extend {
            current.anchor.unwrap_or(focus)
        } else {
            target
        };
        self.selection = Some(if anchor == target {
            Selection::caret(target)
        } else {
            Selection::range(anchor, target)
        });
    }

    /// Insert text at the caret without going through the editor, the way an
    /// input method writes composition text into the surface.
    pub fn native_insert(&mut self, text: &str) {
        let Some(selection) = self.selection else {
            return;
        };
        let focus = selection.focus;
        let inserted = text.chars().count();
        let caret = match self.tree.data(focus.node) {
            NodeData::Text(existing) => {
                let byte = existing
                    .char_indices()
                    .nth(focus.offset)
                    .map_or(existing.len(), |(index, _)| index);
                let mut updated = existing.clone();
                updated.insert_str(byte, text);
                self.tree.set_text(focus.node, updated);
                Position::new(focus.node, focus.offset + inserted)
            }
            NodeData::Element(_) => {
                let leaf = self.tree.insert_text(focus.node, focus.offset, text);
                Position::new(leaf, inserted)
            }
            NodeData::LineBreak => return,
        };
        self.selection = Some(Selection::caret(caret));
        self.relayout();
    }

    fn check(&self, position: Position) -> Result<(), RangeError> {
        if !self.tree.contains(position.node) {
            return Err(RangeError::DetachedNode(position.node));
        }
        let len = self.tree.node_len(position.node);
        if position.offset > len {
            return Err(RangeError::OffsetOutOfBounds {
                offset: position.offset,
                len,
            });
        }
        Ok(())
    }
}

impl Host for MemoryHost {
    fn tree(&self) -> &VisualTree {
        &self.tree
    }

    fn mount(&mut self, tree: VisualTree) {
        self.tree = tree;
        self.selection = None;
        self.relayout();
        self.scroll_top = self.scroll_top.min(self.max_scroll());
        trace!(rows = self.layout.row_count(), "mounted tree");
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn select(&mut self, anchor: Position, focus: Position) -> Result<(), RangeError> {
        self.check(anchor)?;
        self.check(focus)?;
        self.selection = Some(if anchor == focus {
            Selection::caret(focus)
        } else {
            Selection::range(anchor, focus)
        });
        Ok(())
    }

    fn delete_contents(&mut self, start: Position, end: Position) -> Result<(), RangeError> {
        self.check(start)?;
        self.check(end)?;
        if start.node != end.node {
            return Err(RangeError::Unsupported("range spans several nodes"));
        }
        let Some(text) = self.tree.text(start.node) else {
            return Err(RangeError::Unsupported("range is not inside a text node"));
        };
        if start.offset > end.offset {
            return Err(RangeError::OffsetOutOfBounds {
                offset: start.offset,
                len: end.offset,
            });
        }
        let kept: String = text
            .chars()
            .take(start.offset)
            .chain(text.chars().skip(end.offset))
            .collect();
        self.tree.set_text(start.node, kept);
        self.selection = Some(Selection::caret(start));
        self.relayout();
        Ok(())
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_caret_visible(&mut self, visible: bool) {
        self.caret_visible = visible;
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_top: self.scroll_top,
            client_height: self.client_height,
        }
    }

    fn node_box(&self, node: NodeId) -> Option<NodeBox> {
        self.layout.node_rows(node).map(|(first, last)| NodeBox {
            top: first,
            height: last - first + 1,
        })
    }

    fn scroll_to(&mut self, top: usize, behavior: ScrollBehavior) {
        self.scroll_top = top.min(self.max_scroll());
        self.last_scroll = Some((top, behavior));
    }

    /// The caret's own row; a terminal has no taller line box.
    fn caret_box(&self, position: Position) -> Option<NodeBox> {
        self.layout
            .locate(&self.tree, position)
            .map(|(row, _)| NodeBox { top: row, height: 1 })
    }

    fn scroll_anchor(&self) -> Option<Position> {
        (self.scroll_top..self.layout.row_count()).find_map(|row| self.layout.hit_test(row, 0))
    }
}
