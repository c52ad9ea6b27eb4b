//! Mapping between logical text offsets and visual tree positions.
//!
//! The logical document is a flat string; the visual tree nests inline and
//! block elements around pieces of it. Walking the tree in document order:
//! - text leaves contribute their char length
//! - a line break contributes one unit
//! - a block element followed by a sibling contributes one unit after its
//!   content (the implicit newline between blocks)
//! - `display: none` and `data-type="ignore"` subtrees contribute nothing

use serde::{Deserialize, Serialize};

use crate::dom::{Display, NodeData, NodeId, VisualTree};

/// A boundary point in the visual tree.
///
/// For text leaves `offset` is a char offset into the text; for elements it
/// is a child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A logical offset, or the end of the document.
///
/// Serialized as a signed integer where `-1` means [`TextOffset::End`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TextOffset {
    At(usize),
    End,
}

impl From<i64> for TextOffset {
    fn from(value: i64) -> Self {
        usize::try_from(value).map_or(Self::End, Self::At)
    }
}

impl From<TextOffset> for i64 {
    fn from(value: TextOffset) -> Self {
        match value {
            TextOffset::At(offset) => Self::try_from(offset).unwrap_or(Self::MAX),
            TextOffset::End => -1,
        }
    }
}

impl From<usize> for TextOffset {
    fn from(value: usize) -> Self {
        Self::At(value)
    }
}

/// Outcome of walking one subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Found(Position),
    /// Not in this subtree; carries the budget left for the rest of the walk.
    Remaining(i64),
}

/// Resolve `offset` to a position under `root`.
///
/// Returns `None` when the offset lies beyond the content. With
/// `editable_only`, leaves under a `contenteditable=false` element are
/// passed over and the walk settles on the next acceptable leaf.
/// A rejected leaf that would have held the offset leaves a budget of zero
/// rather than the budget it was entered with, so the caret snaps forward
/// to the start of the next editable leaf.
pub fn offset_to_node(
    tree: &VisualTree,
    root: NodeId,
    offset: TextOffset,
    editable_only: bool,
) -> Option<Position> {
    match offset {
        TextOffset::End => Some(last_position(tree, root)),
        TextOffset::At(offset) => {
            let budget = i64::try_from(offset).unwrap_or(i64::MAX);
            match walk(tree, root, root, budget, true, editable_only) {
                Walk::Found(position) => Some(position),
                Walk::Remaining(_) => None,
            }
        }
    }
}

/// Resolve `offset`, falling back to the end of the content.
pub fn resolve(tree: &VisualTree, root: NodeId, offset: TextOffset, editable_only: bool) -> Position {
    offset_to_node(tree, root, offset, editable_only).unwrap_or_else(|| last_position(tree, root))
}

/// The last addressable position under `root`.
///
/// Descends through the last visible child at every level; a text leaf
/// resolves to its end, anything else to offset 0.
pub fn last_position(tree: &VisualTree, root: NodeId) -> Position {
    let mut node = root;
    while let Some(&last) = tree
        .children(node)
        .iter()
        .rev()
        .find(|&&child| !tree.is_skipped(child))
    {
        node = last;
    }
    Position::new(node, tree.text_len(node))
}

fn child_accepts(tree: &VisualTree, child: NodeId, accept: bool, editable_only: bool) -> bool {
    accept
        && (!editable_only
            || tree
                .element(child)
                .is_none_or(|element| element.content_editable != Some(false)))
}

fn walk(
    tree: &VisualTree,
    root: NodeId,
    node: NodeId,
    mut budget: i64,
    accept: bool,
    editable_only: bool,
) -> Walk {
    if tree.is_skipped(node) {
        return Walk::Remaining(budget);
    }
    if budget == 0 {
        return first_leaf(tree, node, accept, editable_only).map_or(Walk::Remaining(0), Walk::Found);
    }
    match tree.data(node) {
        NodeData::Text(_) => {
            let len = i64::try_from(tree.text_len(node)).unwrap_or(i64::MAX);
            budget -= len;
            if budget <= 0 {
                if !accept {
                    return Walk::Remaining(0);
                }
                let offset = usize::try_from(len + budget).unwrap_or(0);
                return Walk::Found(Position::new(node, offset));
            }
            Walk::Remaining(budget)
        }
        NodeData::LineBreak => Walk::Remaining(budget - 1),
        NodeData::Element(element) => {
            for &child in tree.children(node) {
                let child_accept = child_accepts(tree, child, accept, editable_only);
                match walk(tree, root, child, budget, child_accept, editable_only) {
                    Walk::Found(position) => return Walk::Found(position),
                    Walk::Remaining(left) => budget = left,
                }
            }
            if budget > 0
                && element.display == Display::Block
                && node != root
                && tree.next_sibling(node).is_some()
            {
                budget -= 1;
            }
            Walk::Remaining(budget)
        }
    }
}

fn first_leaf(tree: &VisualTree, node: NodeId, accept: bool, editable_only: bool) -> Option<Position> {
    if tree.is_skipped(node) {
        return None;
    }
    match tree.data(node) {
        NodeData::Text(_) | NodeData::LineBreak => accept.then_some(Position::new(node, 0)),
        NodeData::Element(_) => tree.children(node).iter().find_map(|&child| {
            first_leaf(tree, child, child_accepts(tree, child, accept, editable_only), editable_only)
        }),
    }
}

/// Logical offset of `position` under `root`.
///
/// A position the walk cannot reach (detached, or inside a skipped subtree)
/// maps to one before the total length, saturating at zero.
pub fn node_to_offset(tree: &VisualTree, root: NodeId, position: Position) -> usize {
    if !tree.contains(position.node) {
        return 0;
    }
    let mut total = 0;
    if count(tree, root, root, position, &mut total) {
        total
    } else {
        total.saturating_sub(1)
    }
}

fn count(tree: &VisualTree, root: NodeId, node: NodeId, target: Position, total: &mut usize) -> bool {
    if tree.is_skipped(node) {
        return false;
    }
    if node == target.node {
        match tree.data(node) {
            NodeData::Text(_) => *total += target.offset.min(tree.text_len(node)),
            NodeData::LineBreak => *total += target.offset.min(1),
            NodeData::Element(_) => {
                for &child in tree.children(node).iter().take(target.offset) {
                    count(tree, root, child, target, total);
                }
            }
        }
        return true;
    }
    match tree.data(node) {
        NodeData::Text(_) => *total += tree.text_len(node),
        NodeData::LineBreak => *total += 1,
        NodeData::Element(element) => {
            for &child in tree.children(node) {
                if count(tree, root, child, target, total) {
                    return true;
                }
            }
            if element.display == Display::Block
                && node != root
                && tree.next_sibling(node).is_some()
            {
                *total += 1;
            }
        }
    }
    false
}
