//! Theming and color definitions.
//!
//! Text runs are styled by the markdown elements enclosing them. Uses ANSI
//! colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::dom::Marks;

/// Style of a heading of the given level.
pub fn heading_style(level: u8) -> Style {
    match level {
        1 => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        4 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        5 => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

/// Style of a run carrying `marks`.
pub fn style_for_marks(marks: Marks) -> Style {
    let mut style = marks.heading.map_or_else(Style::default, heading_style);

    if marks.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if marks.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if marks.code {
        style = style.fg(Color::Red);
    }
    // visible but outside the editable text
    if marks.ignored {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
    style
}

/// Overlay for selected cells.
pub fn selection_style(base: Style) -> Style {
    base.bg(Color::Blue).fg(Color::White)
}
