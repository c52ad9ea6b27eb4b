//! Reading and writing the host selection in logical offsets.

use tracing::warn;

use crate::host::Host;
use crate::offset::{self, TextOffset};

/// The host selection as a sorted `(start, end)` pair of logical offsets.
///
/// A caret yields `(p, p)`; no selection at all yields `(0, 0)`.
pub fn get_position<H: Host + ?Sized>(host: &H) -> (usize, usize) {
    let Some(selection) = host.selection() else {
        return (0, 0);
    };
    let tree = host.tree();
    let focus = offset::node_to_offset(tree, tree.root(), selection.focus);
    let anchor = selection
        .anchor
        .map_or(focus, |anchor| offset::node_to_offset(tree, tree.root(), anchor));
    (anchor.min(focus), anchor.max(focus))
}

/// Install a selection from logical offsets.
///
/// `start` falls back to the end of the document when it lies past the
/// content. A host rejecting the range leaves the selection as it was.
pub fn set_position<H: Host + ?Sized>(host: &mut H, start: TextOffset, end: Option<TextOffset>) {
    let tree = host.tree();
    let root = tree.root();
    let anchor = offset::resolve(tree, root, start, true);
    let focus = end.map_or(anchor, |end| offset::resolve(tree, root, end, true));
    if let Err(err) = host.select(anchor, focus) {
        warn!(?start, ?end, %err, "could not install selection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, NodeId, VisualTree};
    use crate::host::{MemoryHost, NodeBox, RangeError, ScrollBehavior, Selection, Viewport};
    use crate::offset::Position;

    fn host() -> MemoryHost {
        let mut tree = VisualTree::new();
        let span = tree.append_element(tree.surface(), Element::new("span"));
        tree.append_text(span, "hello ");
        let strong = tree.append_element(span, Element::new("strong"));
        tree.append_text(strong, "world");
        let mut host = MemoryHost::default();
        host.mount(tree);
        host
    }

    #[test]
    fn test_no_selection_reads_as_zero() {
        assert_eq!(get_position(&host()), (0, 0));
    }

    #[test]
    fn test_caret_round_trips() {
        let mut host = host();
        set_position(&mut host, TextOffset::At(8), None);
        assert_eq!(get_position(&host), (8, 8));
    }

    #[test]
    fn test_backward_range_is_sorted() {
        let mut host = host();
        set_position(&mut host, TextOffset::At(9), Some(TextOffset::At(2)));
        assert_eq!(get_position(&host), (2, 9));
    }

    #[test]
    fn test_end_and_overflow_resolve_to_document_end() {
        let mut host = host();
        set_position(&mut host, TextOffset::End, None);
        assert_eq!(get_position(&host), (11, 11));
        set_position(&mut host, TextOffset::At(500), None);
        assert_eq!(get_position(&host), (11, 11));
    }

    /// Delegates to a memory host but refuses every selection.
    struct Rejecting(MemoryHost);

    impl Host for Rejecting {
        fn tree(&self) -> &VisualTree {
            self.0.tree()
        }
        fn mount(&mut self, tree: VisualTree) {
            self.0.mount(tree);
        }
        fn selection(&self) -> Option<Selection> {
            self.0.selection()
        }
        fn select(&mut self, _: Position, _: Position) -> Result<(), RangeError> {
            Err(RangeError::Unsupported("read-only"))
        }
        fn delete_contents(&mut self, start: Position, end: Position) -> Result<(), RangeError> {
            self.0.delete_contents(start, end)
        }
        fn focus(&mut self) {}
        fn blur(&mut self) {}
        fn is_focused(&self) -> bool {
            false
        }
        fn set_caret_visible(&mut self, _: bool) {}
        fn viewport(&self) -> Viewport {
            self.0.viewport()
        }
        fn node_box(&self, node: NodeId) -> Option<NodeBox> {
            self.0.node_box(node)
        }
        fn scroll_to(&mut self, _: usize, _: ScrollBehavior) {}
    }

    #[test]
    fn test_rejected_install_keeps_previous_selection() {
        let mut inner = host();
        set_position(&mut inner, TextOffset::At(3), None);
        let mut host = Rejecting(inner);
        set_position(&mut host, TextOffset::At(7), None);
        assert_eq!(get_position(&host), (3, 3));
    }
}
