use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use quizdesk_core::api::UploadKind;
use quizdesk_core::models::Info;

use crate::app::App;
use crate::ui::styles;

use super::{panel, render_message, row_style};

pub fn render(frame: &mut Frame, app: &App, infos: &[Info], area: Rect) {
    if infos.is_empty() {
        render_message(
            frame,
            area,
            "Info Banners",
            "No info banners.\nPress [n] to upload one.",
            styles::muted_style(),
        );
        return;
    }

    let api = app.session.api();
    let header = Row::new([Cell::from("Title"), Cell::from("Image")])
        .style(styles::title_style())
        .height(1);

    let rows: Vec<Row> = infos
        .iter()
        .enumerate()
        .map(|(i, info)| {
            let image = info
                .image_url
                .as_deref()
                .filter(|f| !f.is_empty())
                .map(|f| api.upload_url(UploadKind::Image, f))
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![Cell::from(info.title.as_str()), Cell::from(image)])
                .style(row_style(i == app.selection))
        })
        .collect();

    let widths = [Constraint::Percentage(40), Constraint::Fill(1)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!(" Info Banners ({}) ", infos.len()), true))
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(table, area, &mut state);
}
