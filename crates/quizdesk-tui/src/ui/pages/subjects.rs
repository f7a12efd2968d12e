use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use quizdesk_core::models::Subject;
use quizdesk_core::utils::truncate_string;

use crate::app::App;
use crate::ui::styles;

use super::{panel, render_message, row_style, split_list_detail};

pub fn render(frame: &mut Frame, app: &App, subjects: &[Subject], area: Rect) {
    if subjects.is_empty() {
        render_message(
            frame,
            area,
            "Subjects",
            "No subjects yet.\nPress [n] to create the first one.",
            styles::muted_style(),
        );
        return;
    }

    let (list_area, detail_area) = split_list_detail(area);

    let header = Row::new([Cell::from("Title"), Cell::from("Description")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            Row::new(vec![
                Cell::from(subject.title.as_str()),
                Cell::from(truncate_string(&subject.description, 40)),
            ])
            .style(row_style(i == app.selection))
        })
        .collect();

    let widths = [Constraint::Percentage(40), Constraint::Fill(1)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(" Subjects ({}) ", subjects.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, list_area, &mut state);

    let content = match subjects.get(app.selection) {
        Some(subject) => {
            let description = if subject.description.trim().is_empty() {
                Line::from(Span::styled("No description", styles::muted_style()))
            } else {
                Line::from(subject.description.as_str())
            };
            vec![
                Line::from(Span::styled(subject.title.as_str(), styles::title_style())),
                Line::from(""),
                description,
                Line::from(""),
                Line::from(vec![
                    Span::styled("[Enter] ", styles::help_key_style()),
                    Span::styled("open chapters", styles::muted_style()),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Select a subject from the list",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content)
        .block(panel(" Subject ".to_string(), false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, detail_area);
}
