use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use quizdesk_core::models::{Chapter, QuizQuestion, OPTION_LABELS};
use quizdesk_core::utils::truncate_string;

use crate::app::App;
use crate::ui::styles;

use super::{panel, render_message, row_style, split_list_detail};

pub fn render(
    frame: &mut Frame,
    app: &App,
    chapter: &Chapter,
    questions: &[QuizQuestion],
    area: Rect,
) {
    if questions.is_empty() {
        render_message(
            frame,
            area,
            &format!("Quiz: {}", chapter.title),
            "No questions in this chapter yet.\nPress [n] to write the first one.",
            styles::muted_style(),
        );
        return;
    }

    let (list_area, detail_area) = split_list_detail(area);

    let items: Vec<ListItem> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            ListItem::new(format!(
                "#{:<3} {}",
                q.display_number(i),
                truncate_string(&q.question, 50)
            ))
            .style(row_style(i == app.selection))
        })
        .collect();

    let list = List::new(items).block(panel(
        format!(" Quiz: {} ({}) ", chapter.title, questions.len()),
        true,
    ));
    let mut state = ListState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(list, list_area, &mut state);

    let Some(question) = questions.get(app.selection) else {
        return;
    };
    let correct = question.correct_label();

    let mut lines = vec![
        Line::from(Span::styled(question.question.as_str(), styles::title_style())),
        Line::from(""),
    ];
    for (label, option) in OPTION_LABELS.iter().zip(question.options.iter()) {
        let style = if correct == Some(*label) {
            styles::answer_style()
        } else {
            styles::list_item_style()
        };
        let marker = if correct == Some(*label) { "  ✓" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}. ", label), styles::highlight_style()),
            Span::styled(option.as_str(), style),
            Span::styled(marker, styles::success_style()),
        ]));
    }

    if correct.is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Answer \"{}\" matches no option", question.correct_answer),
            styles::error_style(),
        )));
    }

    if let Some(explanation) = question.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Explanation", styles::highlight_style())));
        lines.push(Line::from(explanation));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(
            format!(" Question #{} ", question.display_number(app.selection)),
            false,
        ))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, detail_area);
}
