use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::dom::{Row, RowLayout, TAB_WIDTH, VisualTree};
use crate::host::{Host, MemoryHost};

use super::{DOCUMENT_LEFT_PADDING, status, style};

/// A selection as ordered `(row, char column)` cells.
type CellRange = ((usize, usize), (usize, usize));

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let editor_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_document(model.editor.host(), frame, editor_area);

    // Toasts sit over the last document row.
    if model.active_toast().is_some() && editor_area.height > 0 {
        let toast_area = Rect {
            y: editor_area.y + editor_area.height - 1,
            height: 1,
            ..editor_area
        };
        status::render_toast_bar(model, frame, toast_area);
    }

    status::render_status_bar(model, frame, status_area);
}

fn render_document(host: &MemoryHost, frame: &mut Frame, area: Rect) {
    let layout = host.layout();
    let top = host.viewport().scroll_top;
    let selected = selected_cells(host);

    let content: Vec<Line> = layout
        .rows()
        .iter()
        .enumerate()
        .skip(top)
        .take(usize::from(area.height))
        .map(|(index, row)| row_line(row, index, selected))
        .collect();

    let doc_area = Rect {
        x: area.x + DOCUMENT_LEFT_PADDING.min(area.width),
        width: area.width.saturating_sub(DOCUMENT_LEFT_PADDING),
        ..area
    };
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), doc_area);

    if let Some(position) = cursor_position(host, doc_area) {
        frame.set_cursor_position(position);
    }
}

fn selected_cells(host: &MemoryHost) -> Option<CellRange> {
    let selection = host.selection()?;
    let anchor = selection.anchor?;
    let tree: &VisualTree = host.tree();
    let layout: &RowLayout = host.layout();
    let a = layout.locate(tree, anchor)?;
    let b = layout.locate(tree, selection.focus)?;
    (a != b).then(|| if a <= b { (a, b) } else { (b, a) })
}

/// One laid-out row as styled spans, with tabs expanded.
fn row_line(row: &Row, index: usize, selected: Option<CellRange>) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut col = 0;

    for segment in &row.segments {
        let base = style::style_for_marks(segment.marks);
        for c in segment.text.chars() {
            let in_selection = selected.is_some_and(|(start, end)| {
                (index, col) >= start && (index, col) < end
            });
            let cell_style = if in_selection {
                style::selection_style(base)
            } else {
                base
            };
            if cell_style != run_style && !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            run_style = cell_style;
            if c == '\t' {
                run.push_str(&" ".repeat(TAB_WIDTH));
            } else {
                run.push(c);
            }
            col += 1;
        }
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    // A selection running past the end of the row covers its newline.
    if selected.is_some_and(|(start, end)| (index, col) >= start && index < end.0) {
        spans.push(Span::styled(" ", style::selection_style(Style::default())));
    }
    Line::from(spans)
}

fn cursor_position(host: &MemoryHost, area: Rect) -> Option<Position> {
    if !host.is_focused() || !host.caret_visible() {
        return None;
    }
    let (row, col) = host.caret_cell()?;
    let top = host.viewport().scroll_top;
    let y = row.checked_sub(top)?;
    let x = host.layout().display_col(row, col);
    let y = u16::try_from(y).ok().filter(|&y| y < area.height)?;
    let x = u16::try_from(x).ok().filter(|&x| x < area.width)?;
    Some(Position::new(area.x + x, area.y + y))
}
