//! Markdown parsing with comrak.

use comrak::nodes::{AstNode, NodeValue, Sourcepos};
use comrak::{Arena, Options, parse_document};

use super::types::{AuxValue, NodeKind, VisualNode};

/// Parse markdown into a pre-order list of nodes with char spans.
///
/// The first node is always the root, spanning the whole input.
///
/// # Example
///
/// ```
/// use markedit::document::{NodeKind, parse};
///
/// let nodes = parse("# Hi **there**");
/// assert_eq!(nodes[0].kind, NodeKind::Root);
/// assert!(nodes.iter().any(|node| node.kind == NodeKind::Strong));
/// ```
pub fn parse(source: &str) -> Vec<VisualNode> {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);
    let offsets = SourceOffsets::new(source);

    let mut nodes = Vec::new();
    for node in root.descendants() {
        let visual = convert(node, &offsets);
        nodes.push(visual);
    }
    if let Some(first) = nodes.first_mut() {
        first.start = 0;
        first.end = offsets.char_len();
    }
    nodes
}

fn create_options() -> Options {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    options
}

fn convert<'a>(node: &'a AstNode<'a>, offsets: &SourceOffsets) -> VisualNode {
    let data = node.data.borrow();
    let (start, end) = offsets.span(data.sourcepos);
    let visual = |kind| VisualNode::new(kind, start, end);
    match &data.value {
        NodeValue::Document => visual(NodeKind::Root),
        NodeValue::Paragraph => visual(NodeKind::Paragraph),
        NodeValue::Heading(heading) => {
            visual(NodeKind::Heading).with_aux(AuxValue::Depth(heading.level))
        }
        NodeValue::ThematicBreak => visual(NodeKind::ThematicBreak),
        NodeValue::BlockQuote => visual(NodeKind::Blockquote),
        NodeValue::List(_) => visual(NodeKind::List),
        NodeValue::Item(_) | NodeValue::TaskItem(_) => visual(NodeKind::ListItem),
        NodeValue::CodeBlock(code_block) => {
            let lang = code_block.info.split_whitespace().next().unwrap_or_default();
            if lang.is_empty() {
                visual(NodeKind::Code)
            } else {
                visual(NodeKind::Code).with_aux(AuxValue::Lang(lang.to_string()))
            }
        }
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => visual(NodeKind::Html),
        NodeValue::Table(_) => visual(NodeKind::Table),
        NodeValue::TableRow(_) => visual(NodeKind::TableRow),
        NodeValue::TableCell => visual(NodeKind::TableCell),
        // Soft breaks are part of the surrounding text run
        NodeValue::Text(_) | NodeValue::SoftBreak => visual(NodeKind::Text),
        NodeValue::LineBreak => visual(NodeKind::Break),
        NodeValue::Code(_) => visual(NodeKind::InlineCode),
        NodeValue::Emph => visual(NodeKind::Emphasis),
        NodeValue::Strong => visual(NodeKind::Strong),
        NodeValue::Strikethrough => visual(NodeKind::Delete),
        NodeValue::Link(link) => visual(NodeKind::Link).with_aux(AuxValue::Url(link.url.clone())),
        NodeValue::Image(link) => visual(NodeKind::Image).with_aux(AuxValue::Url(link.url.clone())),
        NodeValue::FootnoteReference(_) => visual(NodeKind::FootnoteReference),
        NodeValue::FootnoteDefinition(_) => visual(NodeKind::FootnoteDefinition),
        _ => visual(NodeKind::Other),
    }
}

/// Converts comrak line/column positions (1-based, byte columns) into char offsets.
struct SourceOffsets {
    line_starts: Vec<usize>,
    char_starts: Vec<usize>,
    byte_len: usize,
}

impl SourceOffsets {
    fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        let char_starts = source.char_indices().map(|(index, _)| index).collect();
        Self {
            line_starts,
            char_starts,
            byte_len: source.len(),
        }
    }

    fn char_len(&self) -> usize {
        self.char_starts.len()
    }

    /// Byte offset of a 1-based line plus a byte column past its start.
    fn byte(&self, line: usize, column: usize) -> usize {
        let Some(line_start) = line.checked_sub(1).and_then(|index| self.line_starts.get(index))
        else {
            return if line == 0 { 0 } else { self.byte_len };
        };
        (line_start + column).min(self.byte_len)
    }

    /// Number of chars starting before `byte`.
    fn chars_before(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&start| start < byte)
    }

    /// Half-open char span of a sourcepos (whose end column is inclusive).
    fn span(&self, sourcepos: Sourcepos) -> (usize, usize) {
        let start = self.chars_before(self.byte(sourcepos.start.line, sourcepos.start.column.saturating_sub(1)));
        let end = self.chars_before(self.byte(sourcepos.end.line, sourcepos.end.column));
        (start, end.max(start))
    }
}
