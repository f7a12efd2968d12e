//! Per-route page content. Each page gets the data loaded for it and the
//! area right of the sidebar.

pub mod chapters;
pub mod dashboard;
pub mod info;
pub mod quizzes;
pub mod subjects;
pub mod tryouts;
pub mod users;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::styles;

/// A titled box holding a single message (loading, errors, empty states).
pub fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str, style: Style) {
    let lines: Vec<Line> = std::iter::once(Line::from(""))
        .chain(text.lines().map(|l| Line::styled(format!("  {}", l), style)))
        .collect();

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// List on the left, detail panel on the right.
pub fn split_list_detail(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn row_style(selected: bool) -> Style {
    if selected {
        styles::selected_style()
    } else {
        styles::list_item_style()
    }
}

pub fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused))
}
