//! Line-based layout of a visual tree.
//!
//! Rows break at newlines inside text, at line breaks and around block
//! elements. The layout is what a host measures boxes against: a row is one
//! unit of height.

use unicode_width::UnicodeWidthChar;

use super::tree::{Display, NodeData, NodeId, VisualTree};
use crate::offset::Position;

/// Display width of a tab stop.
pub const TAB_WIDTH: usize = 4;

/// Presentation marks inherited from enclosing elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    pub heading: Option<u8>,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    /// Inside a `data-type="ignore"` subtree: visible but not addressable.
    pub ignored: bool,
}

impl Marks {
    fn apply(mut self, tag: &str) -> Self {
        match tag {
            "strong" | "b" => self.strong = true,
            "em" | "i" => self.emphasis = true,
            "code" | "pre" => self.code = true,
            _ => {
                if let Some(level) = tag.strip_prefix('h').and_then(|n| n.parse::<u8>().ok()) {
                    self.heading = Some(level);
                }
            }
        }
        self
    }
}

/// A run of one leaf's text on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub node: NodeId,
    /// Char offset of this run inside its leaf
    pub start: usize,
    pub text: String,
    pub marks: Marks,
    /// Whether this run is a line break marker (zero width)
    pub line_break: bool,
}

impl Segment {
    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn width(&self) -> usize {
        self.text.chars().map(char_width).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub segments: Vec<Segment>,
}

impl Row {
    fn is_blank(&self) -> bool {
        self.segments.iter().all(|segment| segment.text.is_empty() && !segment.line_break)
    }

    /// Display width of the row.
    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }
}

/// Display width of a char, with tabs expanded.
pub fn char_width(c: char) -> usize {
    if c == '\t' {
        TAB_WIDTH
    } else {
        c.width().unwrap_or(0)
    }
}

/// Rows of a laid-out tree plus the row span of every node.
#[derive(Debug, Clone, Default)]
pub struct RowLayout {
    rows: Vec<Row>,
    spans: Vec<Option<(usize, usize)>>,
}

impl RowLayout {
    /// Lay out `tree` from its root.
    pub fn compute(tree: &VisualTree) -> Self {
        let mut layout = Self {
            rows: vec![Row::default()],
            spans: vec![None; tree.len()],
        };
        layout.walk(tree, tree.root(), Marks::default());
        layout
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First and last row touched by `node` or its descendants.
    pub fn node_rows(&self, node: NodeId) -> Option<(usize, usize)> {
        self.spans.get(node.index()).copied().flatten()
    }

    fn walk(&mut self, tree: &VisualTree, node: NodeId, marks: Marks) {
        match tree.data(node) {
            NodeData::Element(element) => {
                if element.display == Display::None {
                    return;
                }
                let mut marks = marks.apply(&element.tag);
                if element.is_skipped() {
                    marks.ignored = true;
                }
                let block = element.display == Display::Block;
                if block && !self.current_row().is_blank() {
                    self.new_row();
                }
                for &child in tree.children(node) {
                    self.walk(tree, child, marks);
                }
                if block && node != tree.root() && tree.next_sibling(node).is_some() {
                    self.new_row();
                }
            }
            NodeData::Text(text) => {
                let mut start = 0;
                for (i, piece) in text.split('\n').enumerate() {
                    if i > 0 {
                        self.new_row();
                    }
                    self.push_segment(tree, Segment {
                        node,
                        start,
                        text: piece.to_string(),
                        marks,
                        line_break: false,
                    });
                    start += piece.chars().count() + 1;
                }
            }
            NodeData::LineBreak => {
                self.push_segment(tree, Segment {
                    node,
                    start: 0,
                    text: String::new(),
                    marks,
                    line_break: true,
                });
                self.new_row();
            }
        }
    }

    fn current_row(&self) -> &Row {
        // rows always holds at least one row
        &self.rows[self.rows.len() - 1]
    }

    fn new_row(&mut self) {
        self.rows.push(Row::default());
    }

    fn push_segment(&mut self, tree: &VisualTree, segment: Segment) {
        let row = self.rows.len() - 1;
        let mut current = Some(segment.node);
        while let Some(node) = current {
            let span = &mut self.spans[node.index()];
            *span = Some(span.map_or((row, row), |(first, _)| (first, row)));
            current = tree.parent(node);
        }
        self.rows[row].segments.push(segment);
    }

    /// Row and char column of a boundary point.
    pub fn locate(&self, tree: &VisualTree, position: Position) -> Option<(usize, usize)> {
        if !tree.contains(position.node) {
            return None;
        }
        match tree.data(position.node) {
            NodeData::Text(_) | NodeData::LineBreak => {
                for (row_index, row) in self.rows.iter().enumerate() {
                    let mut col = 0;
                    for segment in &row.segments {
                        let len = segment.char_len();
                        if segment.node == position.node
                            && position.offset >= segment.start
                            && position.offset <= segment.start + len
                        {
                            return Some((row_index, col + position.offset - segment.start));
                        }
                        col += len;
                    }
                }
                None
            }
            NodeData::Element(_) => {
                let child = tree.children(position.node).get(position.offset).copied();
                match child {
                    Some(child) => self
                        .locate(tree, Position::new(child, 0))
                        .or_else(|| self.node_rows(child).map(|(first, _)| (first, 0))),
                    None => self.node_rows(position.node).map(|(_, last)| {
                        (last, self.rows[last].segments.iter().map(Segment::char_len).sum())
                    }),
                }
            }
        }
    }

    /// Display column of char column `col` on `row`.
    pub fn display_col(&self, row: usize, col: usize) -> usize {
        self.rows.get(row).map_or(0, |row| {
            row.segments
                .iter()
                .flat_map(|segment| segment.text.chars())
                .take(col)
                .map(char_width)
                .sum()
        })
    }

    /// Boundary point under display column `col` on `row`.
    ///
    /// Only addressable runs are considered; a column past the end of the row
    /// resolves to the end of its last addressable run.
    pub fn hit_test(&self, row: usize, col: usize) -> Option<Position> {
        let row = self.rows.get(row)?;
        let mut x = 0;
        let mut last = None;
        for segment in &row.segments {
            let width = segment.width();
            if segment.marks.ignored {
                x += width;
                continue;
            }
            if segment.line_break {
                return Some(last.unwrap_or(Position::new(segment.node, 0)));
            }
            if col < x + width {
                let mut acc = x;
                for (i, c) in segment.text.chars().enumerate() {
                    let w = char_width(c);
                    if col < acc + w.div_ceil(2).max(1) {
                        return Some(Position::new(segment.node, segment.start + i));
                    }
                    acc += w;
                    if col < acc {
                        return Some(Position::new(segment.node, segment.start + i + 1));
                    }
                }
            }
            x += width;
            last = Some(Position::new(segment.node, segment.start + segment.char_len()));
        }
        last
    }
}
