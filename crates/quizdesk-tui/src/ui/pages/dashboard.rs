use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use quizdesk_core::api::DashboardStats;

use crate::app::{App, NavItem};
use crate::ui::styles;

use super::panel;

pub fn render(frame: &mut Frame, app: &App, stats: &DashboardStats, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Greeting
            Constraint::Length(5), // Counters
            Constraint::Min(0),
        ])
        .split(area);

    let greeting = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Welcome back, "),
            Span::styled(app.greeting_name(), styles::title_style()),
        ]),
    ];
    frame.render_widget(Paragraph::new(greeting), chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    let counters = [
        ("Users", stats.users, NavItem::Users),
        ("Subjects", stats.subjects, NavItem::Subjects),
        ("Try-outs", stats.tryouts, NavItem::TryOuts),
    ];
    for ((label, count, item), card) in counters.iter().zip(cards.iter()) {
        let key = NavItem::ALL.iter().position(|n| n == item).unwrap_or(0) + 1;
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(count.to_string(), styles::stat_style())),
            Line::from(Span::styled(format!("[{}] to open", key), styles::muted_style())),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(format!(" {} ", label), false));
        frame.render_widget(paragraph, *card);
    }
}
