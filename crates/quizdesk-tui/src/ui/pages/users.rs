use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use quizdesk_core::models::User;
use quizdesk_core::utils::format_date;

use crate::app::App;
use crate::ui::styles;

use super::{panel, render_message, row_style};

pub fn render(frame: &mut Frame, app: &App, students: &[User], area: Rect) {
    if students.is_empty() {
        render_message(frame, area, "Users", "No registered students.", styles::muted_style());
        return;
    }

    let header = Row::new([Cell::from("Name"), Cell::from("Email"), Cell::from("Joined")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = students
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let joined = user
                .created_at
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(user.display_name().to_string()),
                Cell::from(user.email.as_str()),
                Cell::from(joined),
            ])
            .style(row_style(i == app.selection))
        })
        .collect();

    let widths = [
        Constraint::Percentage(35),
        Constraint::Fill(1),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(" Students ({}) ", students.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, area, &mut state);
}
