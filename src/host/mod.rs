//! The editable surface the editor drives.
//!
//! A [`Host`] owns the mounted visual tree and everything a browser would
//! track around it: the live selection, focus, caret visibility, the scroll
//! viewport and element boxes. The editor reads and writes this state but
//! never caches it.

mod memory;

pub use memory::{CaretMotion, MemoryHost};

use thiserror::Error;

use crate::dom::{NodeId, VisualTree};
use crate::offset::Position;

/// The host's live selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed end of a ranged selection; `None` when only a caret exists
    pub anchor: Option<Position>,
    /// Moving end of the selection, where the caret is drawn
    pub focus: Position,
}

impl Selection {
    pub const fn caret(focus: Position) -> Self {
        Self { anchor: None, focus }
    }

    pub const fn range(anchor: Position, focus: Position) -> Self {
        Self {
            anchor: Some(anchor),
            focus,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor.is_none_or(|anchor| anchor == self.focus)
    }
}

/// Visible window of the scroll container, in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub scroll_top: usize,
    pub client_height: usize,
}

impl Viewport {
    pub const fn bottom(&self) -> usize {
        self.scroll_top + self.client_height
    }
}

/// Box of a laid-out node relative to the top of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBox {
    pub top: usize,
    pub height: usize,
}

impl NodeBox {
    pub const fn bottom(&self) -> usize {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    #[default]
    Smooth,
}

/// Failure to install or operate on a range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("node {0:?} is not part of the mounted tree")]
    DetachedNode(NodeId),
    #[error("offset {offset} is out of bounds for a node of length {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("range operation not supported: {0}")]
    Unsupported(&'static str),
}

/// An editable surface.
pub trait Host {
    /// The currently mounted tree.
    fn tree(&self) -> &VisualTree;

    /// Replace the mounted tree. The previous selection does not survive.
    fn mount(&mut self, tree: VisualTree);

    fn selection(&self) -> Option<Selection>;

    /// Install a selection; a collapsed one when `anchor == focus`.
    fn select(&mut self, anchor: Position, focus: Position) -> Result<(), RangeError>;

    /// Delete the contents of a range, collapsing the selection at its start.
    fn delete_contents(&mut self, start: Position, end: Position) -> Result<(), RangeError>;

    fn focus(&mut self);
    fn blur(&mut self);
    fn is_focused(&self) -> bool;
    fn set_caret_visible(&mut self, visible: bool);

    fn viewport(&self) -> Viewport;
    fn node_box(&self, node: NodeId) -> Option<NodeBox>;
    fn scroll_to(&mut self, top: usize, behavior: ScrollBehavior);

    /// Box the caret at `position` should be kept inside when scrolling.
    ///
    /// Defaults to the box of the position's parent element.
    fn caret_box(&self, position: Position) -> Option<NodeBox> {
        self.tree()
            .parent(position.node)
            .and_then(|parent| self.node_box(parent))
    }

    /// First position at or below the top of the viewport.
    fn scroll_anchor(&self) -> Option<Position> {
        None
    }
}
