use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use quizdesk_core::routes::Route;

use crate::app::{App, AppState, LoginFocus, NavItem, PageData, PageState};
use crate::form::Form;

use super::pages::{self, chapters, dashboard, info, quizzes, subjects, tryouts, users};
use super::styles;

const SIDEBAR_WIDTH: u16 = 20;

pub fn render(frame: &mut Frame, app: &App) {
    match app.route {
        Some(Route::Login) | None => render_login_page(frame, app),
        Some(_) => render_shell(frame, app),
    }

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Confirming => render_confirm_overlay(frame, app),
        AppState::EditingForm => {
            if let Some(form) = &app.form {
                render_form_overlay(frame, form);
            }
        }
        AppState::Normal | AppState::Quitting => {}
    }
}

/// Title bar, sidebar, page content and status bar around every private page.
fn render_shell(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Sidebar + content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
        .split(chunks[1]);

    render_title_bar(frame, app, chunks[0]);
    render_sidebar(frame, app, body[0]);
    render_main_content(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Quizdesk Admin";
    let page = app
        .route
        .as_ref()
        .map(|r| format!(" / {}", r.title()))
        .unwrap_or_default();
    let user = format!("{}  [?] Help", app.greeting_name());

    let used = title.chars().count() + page.chars().count() + user.chars().count();
    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(page, styles::muted_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used + 2))),
        Span::styled(user, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.route.as_ref().and_then(NavItem::for_route);

    let mut lines = vec![Line::from("")];
    for (i, item) in NavItem::ALL.iter().enumerate() {
        let selected = current == Some(*item);
        let marker = if selected { "▶" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), styles::highlight_style()),
            Span::styled(format!("[{}] ", i + 1), styles::help_key_style()),
            Span::styled(item.title(), styles::nav_style(selected)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("[L] ", styles::help_key_style()),
        Span::styled("Logout", styles::list_item_style()),
    ]));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let Some(route) = &app.route else {
        return;
    };

    match &app.page {
        PageState::Static => {
            if *route == Route::CreateTryOut {
                tryouts::render_builder(frame, app, area);
            }
        }
        PageState::Loading => {
            pages::render_message(frame, area, route.title(), "Loading...", styles::muted_style())
        }
        PageState::Failed(message) => pages::render_message(
            frame,
            area,
            route.title(),
            &format!("{}\n\nPress [r] to retry.", message),
            styles::error_style(),
        ),
        PageState::Ready(data) => match data {
            PageData::Dashboard(stats) => dashboard::render(frame, app, stats, area),
            PageData::Subjects(items) => subjects::render(frame, app, items, area),
            PageData::SubjectDetail { subject, chapters } => {
                chapters::render(frame, app, subject, chapters, area)
            }
            PageData::Quiz { chapter, questions } => {
                quizzes::render(frame, app, chapter, questions, area)
            }
            PageData::TryOuts(items) => tryouts::render_list(frame, app, items, area),
            PageData::TryOutResults { tryout, stats } => {
                tryouts::render_results(frame, app, tryout, stats, area)
            }
            PageData::Users(items) => users::render(frame, app, items, area),
            PageData::Infos(items) => info::render(frame, app, items, area),
        },
    }
}

/// Key hints for the page on screen.
fn page_shortcuts(route: Option<&Route>) -> &'static str {
    match route {
        Some(Route::Subjects) => "[n]ew [e]dit [d]elete [Enter] chapters",
        Some(Route::SubjectDetail(_)) => "[n]ew chapter [d]elete [Enter] quiz [Esc] back",
        Some(Route::ManageQuiz(_)) => "[n]ew [e]dit [d]elete [Esc] back",
        Some(Route::TryOuts) => "[n]ew [d]elete [Enter] results",
        Some(Route::CreateTryOut) => "[e] details [a]dd [Enter] edit [d]elete [s]ave",
        Some(Route::TryOutResults(_)) => "[Esc] back",
        Some(Route::Users) => "[d]elete",
        Some(Route::Info) => "[n]ew [d]elete",
        _ => "",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (left_text, left_style) = match &app.notice {
        Some(notice) if notice.is_error => (format!(" {} ", notice.text), styles::error_style()),
        Some(notice) => (format!(" {} ", notice.text), styles::success_style()),
        None => (
            format!(" {} ", page_shortcuts(app.route.as_ref())),
            styles::muted_style(),
        ),
    };
    let right_text = " [r]eload | [q]uit ";

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn logo_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "     ╔═╗ ╦ ╦╦╔═╗╔╦╗╔═╗╔═╗╦╔═",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "     ║═╬╗║ ║║╔═╝ ║║║╣ ╚═╗╠╩╗",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            "     ╚═╝╚╚═╝╩╚═╝═╩╝╚═╝╚═╝╩ ╩",
            styles::title_style(),
        )),
    ]
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 30, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let mut help_text = logo_lines();
    help_text.extend([
        Line::from(Span::styled(
            format!("              version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        key("1-5", "Dashboard, Try-outs, Subjects, Users, Info"),
        key("↑/↓ j/k", "Move selection"),
        key("PgUp/PgDn", "Move selection by a page"),
        key("Enter", "Open / drill down"),
        key("Esc", "Go back"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        key("n", "New item"),
        key("e", "Edit selected item"),
        key("d", "Delete selected item"),
        key("r", "Reload page"),
        key("L", "Log out"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(" New Try-out", styles::highlight_style())),
        key("e / a", "Edit details / add question"),
        key("s", "Save package"),
        Line::from(""),
        Line::from(Span::styled(" Forms", styles::highlight_style())),
        key("Tab/↑/↓", "Move between fields"),
        key("Ctrl+S", "Submit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_login_page(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 15 } else { 13 };
    let area = centered_rect_fixed(50, height, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.push(Line::from(Span::styled(
        "            Admin Console Login",
        styles::muted_style(),
    )));
    lines.push(Line::from(""));

    let field = |label: &'static str, shown: String, focused: bool| {
        let style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let cursor = if focused { "▌" } else { "" };
        Line::from(vec![
            Span::raw("   "),
            Span::styled(label, styles::muted_style()),
            Span::styled(format!("{:<26}{}", shown, cursor), style),
            Span::styled("]", styles::muted_style()),
        ])
    };

    lines.push(field(
        "Email:    [",
        tail(&app.login_email, 26),
        app.login_focus == LoginFocus::Email,
    ));
    lines.push(field(
        "Password: [",
        "*".repeat(app.login_password.chars().count().min(26)),
        app.login_focus == LoginFocus::Password,
    ));

    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let label = if app.login_pending {
        " Signing in "
    } else if button_focused {
        " ▶ Login ◀ "
    } else {
        "   Login   "
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(label, button_style),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    } else if let Some(ref notice) = app.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", notice.text),
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 10, frame.area());

    frame.render_widget(Clear, area);

    let mut lines = logo_lines();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_confirm_overlay(frame: &mut Frame, app: &App) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let area = centered_rect_fixed(56, 8, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", confirm.message),
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to delete, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Confirm ")
        .title_style(styles::error_style())
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_form_overlay(frame: &mut Frame, form: &Form) {
    let extra = if form.error.is_some() { 2 } else { 0 };
    let height = form.fields.len() as u16 + 6 + extra;
    let area = centered_rect_fixed(72, height, frame.area());
    let value_width = (area.width as usize).saturating_sub(20);

    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let mut spans = vec![
            Span::styled(format!(" {:>15}: ", field.label), styles::muted_style()),
            Span::styled(tail(&field.value, value_width), style),
        ];
        if focused {
            spans.push(Span::styled("▌", style));
        }
        if field.value.is_empty() {
            if let Some(hint) = field.hint {
                spans.push(Span::styled(format!(" {}", hint), styles::muted_style()));
            }
        }
        lines.push(Line::from(spans));
    }

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" [Tab] ", styles::help_key_style()),
        Span::styled("next field  ", styles::muted_style()),
        Span::styled("[Ctrl+S] ", styles::help_key_style()),
        Span::styled("save  ", styles::muted_style()),
        Span::styled("[Esc] ", styles::help_key_style()),
        Span::styled("cancel", styles::muted_style()),
    ]));

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The last `width` characters of `s`, so the cursor end stays visible.
fn tail(s: &str, width: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(width)).collect()
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_end_of_long_input() {
        assert_eq!(tail("abc", 5), "abc");
        assert_eq!(tail("/home/admin/video.mp4", 9), "video.mp4");
        assert_eq!(tail("", 3), "");
    }

    #[test]
    fn test_centered_rect_fits_small_screens() {
        let rect = centered_rect_fixed(50, 20, Rect::new(0, 0, 40, 10));
        assert_eq!(rect, Rect::new(0, 0, 40, 10));

        let rect = centered_rect_fixed(20, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(rect, Rect::new(40, 20, 20, 10));
    }
}
