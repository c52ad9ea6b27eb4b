//! Component mapping and visual tree construction.
//!
//! A [`Components`] table decides how each markdown construct is rendered.
//! Constructs with no entry are not wrapped at all: their source text shows
//! up as plain text between the mapped constructs around them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::types::{NodeKind, VisualNode};
use crate::dom::{Element, NodeId, VisualTree};

/// Output of a component: a small tree mounted into the visual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Element {
        element: Element,
        children: Vec<Rendered>,
    },
    Text(String),
    LineBreak,
}

impl Rendered {
    pub const fn element(element: Element, children: Vec<Self>) -> Self {
        Self::Element { element, children }
    }
}

/// Renders one node given its already rendered children.
pub type RenderFn = Arc<dyn Fn(&VisualNode, Vec<Rendered>) -> Rendered + Send + Sync>;

/// Mapping from markdown construct to renderer.
#[derive(Clone)]
pub struct Components {
    entries: HashMap<NodeKind, Option<RenderFn>>,
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, render)| render.is_some())
            .map(|(kind, _)| kind.as_str())
            .collect();
        kinds.sort_unstable();
        f.debug_struct("Components").field("kinds", &kinds).finish()
    }
}

impl Default for Components {
    fn default() -> Self {
        let mut entries: HashMap<NodeKind, Option<RenderFn>> = HashMap::new();
        entries.insert(
            NodeKind::Heading,
            entry(|node, children| {
                let tag = format!("h{}", node.depth().unwrap_or(1));
                wrap(&tag, node, children)
            }),
        );
        for (kind, tag) in [
            (NodeKind::Strong, "strong"),
            (NodeKind::Emphasis, "em"),
            (NodeKind::InlineCode, "em"),
            (NodeKind::Code, "code"),
            (NodeKind::List, "code"),
            (NodeKind::Table, "code"),
        ] {
            entries.insert(kind, entry(move |node, children| wrap(tag, node, children)));
        }
        Self { entries }
    }
}

fn entry<F>(render: F) -> Option<RenderFn>
where
    F: Fn(&VisualNode, Vec<Rendered>) -> Rendered + Send + Sync + 'static,
{
    Some(Arc::new(render))
}

/// Inline element tagged with the node's kind around `children`.
pub fn wrap(tag: &str, node: &VisualNode, children: Vec<Rendered>) -> Rendered {
    Rendered::element(Element::new(tag).with_kind(node.kind.as_str()), children)
}

impl Components {
    /// A table with no entries: everything renders as plain text.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Override the renderer for `kind`.
    #[must_use]
    pub fn with<F>(mut self, kind: NodeKind, render: F) -> Self
    where
        F: Fn(&VisualNode, Vec<Rendered>) -> Rendered + Send + Sync + 'static,
    {
        self.entries.insert(kind, entry(render));
        self
    }

    /// Render `kind` as plain text.
    #[must_use]
    pub fn without(mut self, kind: NodeKind) -> Self {
        self.entries.insert(kind, None);
        self
    }

    pub fn get(&self, kind: NodeKind) -> Option<&RenderFn> {
        self.entries.get(&kind).and_then(Option::as_ref)
    }
}

/// Walks the node list in step with the source text.
struct Builder<'a> {
    text: Vec<char>,
    nodes: &'a [VisualNode],
    components: &'a Components,
    position: usize,
    index: usize,
}

impl Builder<'_> {
    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.text.len());
        let start = start.min(end);
        self.text[start..end].iter().collect()
    }

    /// Render everything from the current position up to `limit`.
    fn until(&mut self, limit: usize) -> Vec<Rendered> {
        let nodes = self.nodes;
        let components = self.components;
        let mut out = Vec::new();
        while self.position < limit && self.index < nodes.len() {
            let node = &nodes[self.index];
            if node.start > limit {
                out.push(Rendered::Text(self.slice(self.position, limit)));
                self.position = limit;
                break;
            }
            if self.position < node.start {
                out.push(Rendered::Text(self.slice(self.position, node.start)));
                self.position = node.start;
                continue;
            }
            self.index += 1;
            if let Some(render) = components.get(node.kind) {
                let children = if self.index < nodes.len() {
                    self.until(node.end)
                } else {
                    let text = self.slice(node.start, node.end);
                    self.position = node.end;
                    vec![Rendered::Text(text)]
                };
                out.push(render(node, children));
            }
        }
        if self.position < limit {
            out.push(Rendered::Text(self.slice(self.position, limit)));
            self.position = limit;
        }
        out
    }
}

/// Build the visual tree for `text` from its parsed nodes.
///
/// Text nodes are dropped from the list so that text between mapped
/// constructs is emitted verbatim. The content is wrapped in one inline
/// `span` under the editable surface; an empty document leaves the surface
/// empty.
pub fn build_tree(text: &str, nodes: &[VisualNode], components: &Components) -> VisualTree {
    let nodes: Vec<VisualNode> = nodes
        .iter()
        .filter(|node| node.kind != NodeKind::Text)
        .cloned()
        .collect();
    let mut builder = Builder {
        text: text.chars().collect(),
        nodes: &nodes,
        components,
        position: 0,
        index: 0,
    };
    let len = builder.text.len();
    let rendered = builder.until(len);

    let mut tree = VisualTree::new();
    if !rendered.is_empty() {
        let span = tree.append_element(tree.surface(), Element::new("span"));
        for item in rendered {
            mount(&mut tree, span, item);
        }
    }
    tree
}

fn mount(tree: &mut VisualTree, parent: NodeId, rendered: Rendered) {
    match rendered {
        Rendered::Element { element, children } => {
            let id = tree.append_element(parent, element);
            for child in children {
                mount(tree, id, child);
            }
        }
        Rendered::Text(text) => {
            if !text.is_empty() {
                tree.append_text(parent, text);
            }
        }
        Rendered::LineBreak => {
            tree.append_line_break(parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    fn compile(text: &str, components: &Components) -> VisualTree {
        build_tree(text, &parse(text), components)
    }

    fn tags(tree: &VisualTree) -> Vec<String> {
        tree.descendants(tree.surface())
            .into_iter()
            .filter_map(|id| tree.element(id).map(|element| element.tag.clone()))
            .collect()
    }

    #[test]
    fn test_text_content_is_preserved_verbatim() {
        let text = "# Title\n\nSome **bold** and `code`.\n\n- a\n- b\n";
        let tree = compile(text, &Components::default());
        assert_eq!(tree.text_content(tree.surface()), text);
    }

    #[test]
    fn test_default_components() {
        let tree = compile("## Hi *there* **you** `x`", &Components::default());
        assert_eq!(tags(&tree), vec!["div", "span", "h2", "em", "strong", "em"]);
    }

    #[test]
    fn test_heading_element_carries_kind() {
        let tree = compile("# A", &Components::default());
        let span = tree.children(tree.surface())[0];
        let heading = tree.children(span)[0];
        let element = tree.element(heading).unwrap();
        assert_eq!(element.tag, "h1");
        assert_eq!(element.kind.as_deref(), Some("heading"));
        assert_eq!(tree.text_content(heading), "# A");
    }

    #[test]
    fn test_unmapped_kinds_degrade_to_text() {
        let tree = compile("**b** *e*", &Components::empty());
        assert_eq!(tags(&tree), vec!["div", "span"]);
        assert_eq!(tree.text_content(tree.surface()), "**b** *e*");
    }

    #[test]
    fn test_custom_component_overrides_default() {
        let components = Components::default()
            .with(NodeKind::Strong, |node, children| wrap("b", node, children))
            .without(NodeKind::Emphasis);
        let tree = compile("**b** *e*", &components);
        assert_eq!(tags(&tree), vec!["div", "span", "b"]);
    }

    #[test]
    fn test_empty_document_leaves_surface_empty() {
        let tree = compile("", &Components::default());
        assert!(tree.children(tree.surface()).is_empty());
    }

    #[test]
    fn test_everything_is_inline() {
        let tree = compile("# A\n\nB\n\n```\nc\n```\n", &Components::default());
        for id in tree.descendants(tree.surface()).into_iter().skip(1) {
            assert_eq!(tree.display(id), crate::dom::Display::Inline);
        }
    }
}
