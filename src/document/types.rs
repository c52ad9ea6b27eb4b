//! Core document types.

use serde::{Deserialize, Serialize};

/// Markdown construct a [`VisualNode`] stands for, named after the mdast types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Root,
    Paragraph,
    Heading,
    ThematicBreak,
    Blockquote,
    List,
    ListItem,
    Code,
    Html,
    Table,
    TableRow,
    TableCell,
    Text,
    Break,
    InlineCode,
    Emphasis,
    Strong,
    Delete,
    Link,
    Image,
    FootnoteReference,
    FootnoteDefinition,
    Other,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::ThematicBreak => "thematicBreak",
            Self::Blockquote => "blockquote",
            Self::List => "list",
            Self::ListItem => "listItem",
            Self::Code => "code",
            Self::Html => "html",
            Self::Table => "table",
            Self::TableRow => "tableRow",
            Self::TableCell => "tableCell",
            Self::Text => "text",
            Self::Break => "break",
            Self::InlineCode => "inlineCode",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Delete => "delete",
            Self::Link => "link",
            Self::Image => "image",
            Self::FootnoteReference => "footnoteReference",
            Self::FootnoteDefinition => "footnoteDefinition",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuxValue {
    /// Heading level, 1 to 6
    Depth(u8),
    /// Link or image destination
    Url(String),
    /// Info string of a fenced code block
    Lang(String),
}

/// One parsed markdown construct and the char span of source it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualNode {
    pub kind: NodeKind,
    /// Char offset of the first covered char
    pub start: usize,
    /// Char offset one past the last covered char
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux: Option<AuxValue>,
}

impl VisualNode {
    pub const fn new(kind: NodeKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            aux: None,
        }
    }

    #[must_use]
    pub fn with_aux(mut self, aux: AuxValue) -> Self {
        self.aux = Some(aux);
        self
    }

    /// Heading level, if this node carries one.
    pub const fn depth(&self) -> Option<u8> {
        match self.aux {
            Some(AuxValue::Depth(depth)) => Some(depth),
            _ => None,
        }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
