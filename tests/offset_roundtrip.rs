//! Property tests for the offset mapper.

use markedit::document::{Compiler, MarkdownCompiler};
use markedit::dom::{Element, VisualTree};
use markedit::offset::{TextOffset, node_to_offset, offset_to_node};
use proptest::prelude::*;

/// An inline-only tree: text pieces, some wrapped in `strong`/`em`.
fn inline_tree(pieces: &[(String, u8)]) -> (VisualTree, usize) {
    let mut tree = VisualTree::new();
    let span = tree.append_element(tree.surface(), Element::new("span"));
    let mut len = 0;
    for (text, wrap) in pieces {
        len += text.chars().count();
        let parent = match wrap {
            1 => tree.append_element(span, Element::new("strong")),
            2 => tree.append_element(span, Element::new("em")),
            _ => span,
        };
        tree.append_text(parent, text.clone());
    }
    (tree, len)
}

proptest! {
    #[test]
    fn roundtrip_inline_trees(pieces in prop::collection::vec(("[a-zé日 ]{1,6}", 0u8..3), 1..6)) {
        let (tree, len) = inline_tree(&pieces);
        for offset in 0..=len {
            let position = offset_to_node(&tree, tree.root(), TextOffset::At(offset), true)
                .expect("offset inside content resolves");
            prop_assert_eq!(node_to_offset(&tree, tree.root(), position), offset);
        }
        prop_assert_eq!(offset_to_node(&tree, tree.root(), TextOffset::At(len + 1), true), None);
    }

    #[test]
    fn roundtrip_compiled_markdown(text in "[a-z*_`# \n]{1,40}") {
        let tree = Compiler::default().compile(&text);
        prop_assert_eq!(tree.text_content(tree.root()), text.clone());
        let len = text.chars().count();
        for offset in 0..=len {
            let position = offset_to_node(&tree, tree.root(), TextOffset::At(offset), true)
                .expect("every offset of compiled text resolves");
            prop_assert_eq!(node_to_offset(&tree, tree.root(), position), offset);
        }
    }
}

#[test]
fn compiled_text_matches_source() {
    let text = "# Notes\n\n- **one**\n- _two_\n\n```\ncode\n```\n";
    let tree = Compiler::default().compile(text);
    assert_eq!(tree.text_content(tree.root()), text);
}
