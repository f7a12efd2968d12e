use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use quizdesk_core::api::UploadKind;
use quizdesk_core::models::{Chapter, Subject};

use crate::app::App;
use crate::ui::styles;

use super::{panel, render_message, row_style, split_list_detail};

pub fn render(frame: &mut Frame, app: &App, subject: &Subject, chapters: &[Chapter], area: Rect) {
    if chapters.is_empty() {
        render_message(
            frame,
            area,
            &subject.title,
            "This subject has no chapters yet.\nPress [n] to add one.",
            styles::muted_style(),
        );
        return;
    }

    let (list_area, detail_area) = split_list_detail(area);

    let items: Vec<ListItem> = chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let media = match (chapter.video().is_some(), chapter.document().is_some()) {
                (true, true) => " [video, pdf]",
                (true, false) => " [video]",
                (false, true) => " [pdf]",
                (false, false) => "",
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}. {}", i + 1, chapter.title)),
                Span::styled(media, styles::muted_style()),
            ]))
            .style(row_style(i == app.selection))
        })
        .collect();

    let list = List::new(items).block(panel(
        format!(" {} - Chapters ({}) ", subject.title, chapters.len()),
        true,
    ));
    let mut state = ListState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(list, list_area, &mut state);

    render_chapter_detail(frame, app, chapters.get(app.selection), detail_area);
}

fn render_chapter_detail(frame: &mut Frame, app: &App, chapter: Option<&Chapter>, area: Rect) {
    let Some(chapter) = chapter else {
        let paragraph = Paragraph::new(Span::styled(
            "Select a chapter from the list",
            styles::muted_style(),
        ))
        .block(panel(" Chapter ".to_string(), false));
        frame.render_widget(paragraph, area);
        return;
    };

    let api = app.session.api();
    let mut lines = vec![
        Line::from(Span::styled(chapter.title.as_str(), styles::title_style())),
        Line::from(""),
    ];

    if !chapter.description.trim().is_empty() {
        lines.push(Line::from(chapter.description.as_str()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Video", styles::highlight_style())));
    lines.push(match chapter.video() {
        Some(file) => Line::from(api.upload_url(UploadKind::Video, file)),
        None => Line::from(Span::styled("None", styles::muted_style())),
    });
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Document", styles::highlight_style())));
    lines.push(match chapter.document() {
        Some(file) => Line::from(api.upload_url(UploadKind::Document, file)),
        None => Line::from(Span::styled("None", styles::muted_style())),
    });
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter] ", styles::help_key_style()),
        Span::styled("manage quiz", styles::muted_style()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(panel(" Chapter ".to_string(), false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
