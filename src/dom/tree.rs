//! Arena-backed visual tree.

/// `data-type` value that opts an element's subtree out of offset counting.
pub const IGNORE: &str = "ignore";

/// Handle to a node inside a [`VisualTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Computed `display` of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Inline,
    Block,
    None,
}

/// A rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name (`div`, `span`, `strong`, `h1`, ...)
    pub tag: String,
    /// Computed display
    pub display: Display,
    /// `data-type` annotation; [`IGNORE`] skips the subtree when mapping offsets
    pub data_type: Option<String>,
    /// Explicit `contenteditable` attribute (`None` inherits)
    pub content_editable: Option<bool>,
    /// Markdown node type this element renders (`heading`, `strong`, ...)
    pub kind: Option<String>,
}

impl Element {
    /// Create an inline element with no annotations.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            display: Display::Inline,
            data_type: None,
            content_editable: None,
            kind: None,
        }
    }

    /// Create a block element.
    pub fn block(tag: impl Into<String>) -> Self {
        Self::new(tag).with_display(Display::Block)
    }

    #[must_use]
    pub const fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Mark the element `data-type="ignore"`.
    #[must_use]
    pub fn ignored(self) -> Self {
        self.with_data_type(IGNORE)
    }

    #[must_use]
    pub const fn editable(mut self, editable: bool) -> Self {
        self.content_editable = Some(editable);
        self
    }

    /// Whether offset walks skip this element and everything under it.
    pub fn is_skipped(&self) -> bool {
        self.display == Display::None || self.data_type.as_deref() == Some(IGNORE)
    }
}

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(Element),
    Text(String),
    /// A `<br>`: a leaf counting as one offset unit.
    LineBreak,
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The rendered visual tree.
///
/// Every tree has a block root (the scroll container) with exactly one
/// editable block child, the *surface*, under which compiled content lives.
#[derive(Debug, Clone)]
pub struct VisualTree {
    nodes: Vec<Node>,
    root: NodeId,
    surface: NodeId,
}

impl Default for VisualTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualTree {
    /// Create a tree holding only the root container and the editable surface.
    pub fn new() -> Self {
        let root = Node {
            data: NodeData::Element(Element::block("div")),
            parent: None,
            children: Vec::new(),
        };
        let mut tree = Self {
            nodes: vec![root],
            root: NodeId(0),
            surface: NodeId(0),
        };
        tree.surface = tree.append_element(tree.root, Element::block("div").editable(true));
        tree
    }

    /// The scroll container; offset walks start here.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The editable surface holding compiled content.
    pub const fn surface(&self) -> NodeId {
        self.surface
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.push(parent, NodeData::Element(element))
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeData::Text(text.into()))
    }

    pub fn append_line_break(&mut self, parent: NodeId) -> NodeId {
        self.push(parent, NodeData::LineBreak)
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Insert a text leaf as child `index` of `parent`.
    pub fn insert_text(&mut self, parent: NodeId, index: usize, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data: NodeData::Text(text.into()),
            parent: Some(parent),
            children: Vec::new(),
        });
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, id);
        id
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// The element payload, if `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The text payload, if `id` is a text leaf.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replace the contents of a text leaf. Returns `false` for non-text nodes.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> bool {
        match &mut self.nodes[id.0].data {
            NodeData::Text(existing) => {
                *existing = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Text(_))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&child| child == id)?;
        siblings.get(index + 1).copied()
    }

    /// Char length of a text leaf; zero for everything else.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text(id).map_or(0, |text| text.chars().count())
    }

    /// Boundary-point length: chars for text leaves, child count otherwise.
    pub fn node_len(&self, id: NodeId) -> usize {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => text.chars().count(),
            _ => self.nodes[id.0].children.len(),
        }
    }

    /// Computed display; text and line breaks report [`Display::Inline`].
    pub fn display(&self, id: NodeId) -> Display {
        self.element(id).map_or(Display::Inline, |element| element.display)
    }

    /// Whether offset walks skip this node (`display: none` or `data-type="ignore"`).
    pub fn is_skipped(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(Element::is_skipped)
    }

    /// Whether `id` sits in editable content, following `contenteditable` inheritance.
    ///
    /// Text and line-break leaves inherit from their parent element.
    pub fn is_content_editable(&self, id: NodeId) -> bool {
        let mut current = if self.element(id).is_some() {
            Some(id)
        } else {
            self.parent(id)
        };
        while let Some(node) = current {
            if let Some(flag) = self.element(node).and_then(|element| element.content_editable) {
                return flag;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Pre-order list of `id` and its descendants.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Concatenated text of every leaf under `id`, ignoring visibility.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|node| self.text(node))
            .collect()
    }
}
