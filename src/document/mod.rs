//! Markdown compilation.
//!
//! This module handles:
//! - Parsing markdown with comrak into [`VisualNode`]s with char spans
//! - Mapping nodes to rendered elements through [`Components`]
//! - Building the [`VisualTree`] the editor mounts on its host

mod components;
mod parser;
mod types;

pub use components::{Components, RenderFn, Rendered, build_tree, wrap};
pub use parser::parse;
pub use types::{AuxValue, NodeKind, VisualNode};

use crate::dom::VisualTree;

/// Turns document text into a visual tree.
///
/// Any `Fn(&str) -> VisualTree` closure is a compiler too.
pub trait MarkdownCompiler {
    fn compile(&self, text: &str) -> VisualTree;
}

impl<F> MarkdownCompiler for F
where
    F: Fn(&str) -> VisualTree,
{
    fn compile(&self, text: &str) -> VisualTree {
        self(text)
    }
}

/// The comrak-backed compiler.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    components: Components,
}

impl Compiler {
    pub fn new(components: Components) -> Self {
        Self { components }
    }

    pub const fn components(&self) -> &Components {
        &self.components
    }
}

impl MarkdownCompiler for Compiler {
    fn compile(&self, text: &str) -> VisualTree {
        build_tree(text, &parse(text), &self.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn test_compiler_uses_its_components() {
        let compiler = Compiler::new(Components::empty());
        let tree = compiler.compile("**x**");
        let span = tree.children(tree.surface())[0];
        assert_eq!(tree.children(span).len(), 1);
        assert!(tree.is_text(tree.children(span)[0]));
    }

    #[test]
    fn test_closure_is_a_compiler() {
        let compiler = |text: &str| {
            let mut tree = VisualTree::new();
            let p = tree.append_element(tree.surface(), Element::block("p"));
            tree.append_text(p, text.to_uppercase());
            tree
        };
        let tree = compiler.compile("abc");
        assert_eq!(tree.text_content(tree.root()), "ABC");
    }
}
