use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use quizdesk_core::models::{TryOut, TryOutAnalytics, OPTION_LABELS};
use quizdesk_core::utils::{format_score, truncate_string};

use crate::app::App;
use crate::ui::styles;

use super::{panel, render_message, row_style, split_list_detail};

pub fn render_list(frame: &mut Frame, app: &App, tryouts: &[TryOut], area: Rect) {
    if tryouts.is_empty() {
        render_message(
            frame,
            area,
            "Try-outs",
            "No try-out packages yet.\nPress [n] to build one.",
            styles::muted_style(),
        );
        return;
    }

    let header = Row::new([
        Cell::from("Title"),
        Cell::from("Questions"),
        Cell::from("Duration"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = tryouts
        .iter()
        .enumerate()
        .map(|(i, tryout)| {
            let duration = match tryout.duration_minutes() {
                0 => "-".to_string(),
                m => format!("{} min", m),
            };
            Row::new(vec![
                Cell::from(tryout.title.as_str()),
                Cell::from(tryout.question_count().to_string()),
                Cell::from(duration),
            ])
            .style(row_style(i == app.selection))
        })
        .collect();

    let widths = [
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(" Try-out Packages ({}) ", tryouts.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, area, &mut state);
}

/// The try-out being built: details on top, questions below.
pub fn render_builder(frame: &mut Frame, app: &App, area: Rect) {
    let draft = &app.tryout_draft;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(6)])
        .split(area);

    let title = if draft.title.trim().is_empty() {
        Span::styled("(untitled, press [e])", styles::muted_style())
    } else {
        Span::styled(draft.title.as_str(), styles::title_style())
    };
    let details = vec![
        Line::from(vec![Span::styled("Title:       ", styles::muted_style()), title]),
        Line::from(vec![
            Span::styled("Description: ", styles::muted_style()),
            Span::raw(truncate_string(&draft.description, 60)),
        ]),
        Line::from(vec![
            Span::styled("Duration:    ", styles::muted_style()),
            Span::raw(format!("{} minutes", draft.duration)),
        ]),
        Line::from(vec![
            Span::styled("Questions:   ", styles::muted_style()),
            Span::raw(draft.questions.len().to_string()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(details).block(panel(" New Try-out Package ".to_string(), false)),
        chunks[0],
    );

    let (list_area, detail_area) = split_list_detail(chunks[1]);

    let items: Vec<ListItem> = draft
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let (mark, mark_style) = if q.is_complete() {
                ("✓", styles::success_style())
            } else {
                ("✗", styles::error_style())
            };
            let text = if q.question.trim().is_empty() {
                "(empty)".to_string()
            } else {
                truncate_string(&q.question, 40)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", mark), mark_style),
                Span::raw(format!("{}. {}", i + 1, text)),
            ]))
            .style(row_style(i == app.selection))
        })
        .collect();

    let list = List::new(items).block(panel(" Questions ".to_string(), true));
    let mut state = ListState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(list, list_area, &mut state);

    let Some(question) = draft.questions.get(app.selection) else {
        return;
    };
    let correct = question.correct_label();
    let mut lines = vec![
        Line::from(Span::styled(
            if question.question.is_empty() {
                "(no question text)"
            } else {
                question.question.as_str()
            },
            styles::title_style(),
        )),
        Line::from(""),
    ];
    for (label, option) in OPTION_LABELS.iter().zip(question.options.iter()) {
        let style = if correct == Some(*label) {
            styles::answer_style()
        } else {
            styles::list_item_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", label), styles::highlight_style()),
            Span::styled(option.as_str(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(match correct {
        Some(label) => Line::from(Span::styled(
            format!("Correct answer: {}", label),
            styles::success_style(),
        )),
        None => Line::from(Span::styled("No correct answer chosen", styles::error_style())),
    });
    if !question.explanation.trim().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(question.explanation.as_str()));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(format!(" Question {} ", app.selection + 1), false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, detail_area);
}

pub fn render_results(
    frame: &mut Frame,
    app: &App,
    tryout: &TryOut,
    stats: &TryOutAnalytics,
    area: Rect,
) {
    let title = format!("Results: {}", tryout.title);
    if !stats.has_results() {
        let message = stats
            .message
            .as_deref()
            .unwrap_or("No participants have taken this try-out yet.");
        render_message(frame, area, &title, message, styles::muted_style());
        return;
    }

    let (summary_area, table_area) = split_list_detail(area);

    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), styles::muted_style()),
            Span::styled(value, styles::stat_style()),
        ])
    };
    let summary = vec![
        Line::from(Span::styled(tryout.title.as_str(), styles::title_style())),
        Line::from(""),
        stat("Participants", stats.participant_count.to_string()),
        stat("Average", format_score(stats.average_score)),
        stat("Highest", format_score(stats.highest_score)),
        stat("Lowest", format_score(stats.lowest_score)),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(panel(format!(" {} ", title), false)),
        summary_area,
    );

    let header = Row::new([Cell::from("#"), Cell::from("Name"), Cell::from("Score")])
        .style(styles::title_style())
        .height(1);
    let ranked = stats.ranked_participants();
    let rows: Vec<Row> = ranked
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(p.name.as_str()),
                Cell::from(format_score(p.score)),
            ])
            .style(row_style(i == app.selection))
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(" Ranking ({}) ", ranked.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, table_area, &mut state);
}
