//! In-memory visual tree.
//!
//! This module models the editable surface the editor renders into:
//! - [`VisualTree`]: an arena of elements, text leaves and line breaks
//! - [`Element`]: computed display, `data-type` and `contenteditable` flags
//! - [`RowLayout`]: a line-based layout used for boxes, carets and hit tests

mod layout;
mod tree;

pub use layout::{Marks, Row, RowLayout, Segment, TAB_WIDTH, char_width};
pub use tree::{Display, Element, IGNORE, NodeData, NodeId, VisualTree};
