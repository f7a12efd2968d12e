//! Keyboard input handling for the TUI.
//!
//! Overlays (help, quit, delete confirmation, forms) take keys first, then
//! the login page or the global keys, then the keys of the current page.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use quizdesk_core::routes::Route;

use crate::app::{
    can_add_email_char, can_add_password_char, App, AppState, LoginFocus, NavItem,
    PendingAction, PAGE_SCROLL_SIZE,
};
use crate::form::Form;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle delete confirmation
    if matches!(app.state, AppState::Confirming) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.run_confirmed(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
            _ => {}
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::EditingForm) {
        handle_form_input(app, key);
        return Ok(false);
    }

    if matches!(app.route, Some(Route::Login) | None) {
        return Ok(handle_login_input(app, key));
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(item) = NavItem::from_key(c) {
                app.navigate(item.route());
            }
        }
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(1),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(1),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::Home => app.selection = 0,
        KeyCode::End => app.selection = app.list_len().saturating_sub(1),
        _ => {
            // Page-specific input
            match app.route.clone() {
                Some(Route::Subjects) => handle_subjects_input(app, key),
                Some(Route::SubjectDetail(_)) => handle_chapters_input(app, key),
                Some(Route::ManageQuiz(_)) => handle_quiz_input(app, key),
                Some(Route::TryOuts) => handle_tryouts_input(app, key),
                Some(Route::CreateTryOut) => handle_builder_input(app, key),
                Some(Route::Users) => handle_users_input(app, key),
                Some(Route::Info) => handle_info_input(app, key),
                _ => {}
            }
        }
    }

    Ok(false)
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Email,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Email => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Email,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => {
                if !app.login_pending {
                    app.login_focus = LoginFocus::Button;
                    app.attempt_login();
                }
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Email => {
                app.login_email.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Email => {
                if can_add_email_char(app.login_email.chars().count(), c) {
                    app.login_email.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    false
}

fn handle_form_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('s')) {
            app.submit_form();
        }
        return;
    }

    let Some(form) = app.form.as_mut() else {
        app.state = AppState::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => {
            if form.on_last_field() {
                app.submit_form();
            } else {
                form.next_field();
            }
        }
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}

fn handle_subjects_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.open_form(Form::subject(None)),
        KeyCode::Char('e') => {
            if let Some(subject) = app.selected_subject() {
                let form = Form::subject(Some(subject));
                app.open_form(form);
            }
        }
        KeyCode::Char('d') => {
            if let Some(subject) = app.selected_subject() {
                let message = format!("Delete subject \"{}\" and its chapters?", subject.title);
                let action = PendingAction::DeleteSubject(subject.id.clone());
                app.ask_confirm(message, action);
            }
        }
        KeyCode::Enter => {
            if let Some(subject) = app.selected_subject() {
                let route = Route::SubjectDetail(subject.id.clone());
                app.navigate(route);
            }
        }
        _ => {}
    }
}

fn handle_chapters_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => {
            if let Some((subject, _)) = app.current_subject() {
                let form = Form::chapter(&subject.id);
                app.open_form(form);
            }
        }
        KeyCode::Char('d') => {
            if let Some(chapter) = app.selected_chapter() {
                let message = format!("Delete chapter \"{}\"?", chapter.title);
                let action = PendingAction::DeleteChapter(chapter.id.clone());
                app.ask_confirm(message, action);
            }
        }
        KeyCode::Enter => {
            if let Some(chapter) = app.selected_chapter() {
                let route = Route::ManageQuiz(chapter.id.clone());
                app.navigate(route);
            }
        }
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyEvent) {
    let Some((chapter, questions)) = app.current_quiz() else {
        return;
    };
    let chapter_id = chapter.id.clone();
    let subject_id = chapter.subject_id.clone();
    let count = questions.len();

    match key.code {
        KeyCode::Char('n') => {
            let form = Form::quiz(&chapter_id, subject_id.as_deref(), count, None);
            app.open_form(form);
        }
        KeyCode::Char('e') => {
            if let Some(question) = app.selected_question() {
                let form = Form::quiz(&chapter_id, subject_id.as_deref(), count, Some(question));
                app.open_form(form);
            }
        }
        KeyCode::Char('d') => {
            if let Some(question) = app.selected_question() {
                let message = format!(
                    "Delete question #{}?",
                    question.display_number(app.selection)
                );
                let action = PendingAction::DeleteQuiz(question.id.clone());
                app.ask_confirm(message, action);
            }
        }
        _ => {}
    }
}

fn handle_tryouts_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.navigate(Route::CreateTryOut),
        KeyCode::Char('d') => {
            if let Some(tryout) = app.selected_tryout() {
                let message = format!("Delete try-out \"{}\"?", tryout.title);
                let action = PendingAction::DeleteTryOut(tryout.id.clone());
                app.ask_confirm(message, action);
            }
        }
        KeyCode::Enter => {
            if let Some(tryout) = app.selected_tryout() {
                let route = Route::TryOutResults(tryout.id.clone());
                app.navigate(route);
            }
        }
        _ => {}
    }
}

/// Keys of the try-out builder page.
fn handle_builder_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e') => {
            let form = Form::tryout_details(&app.tryout_draft);
            app.open_form(form);
        }
        KeyCode::Char('a') => {
            app.add_tryout_question();
            let index = app.selection;
            if let Some(question) = app.tryout_draft.questions.get(index) {
                let form = Form::tryout_question(index, question);
                app.open_form(form);
            }
        }
        KeyCode::Enter => {
            let index = app.selection;
            if let Some(question) = app.tryout_draft.questions.get(index) {
                let form = Form::tryout_question(index, question);
                app.open_form(form);
            }
        }
        KeyCode::Char('d') => app.remove_tryout_question(),
        KeyCode::Char('s') => app.save_tryout(),
        _ => {}
    }
}

fn handle_users_input(app: &mut App, key: KeyEvent) {
    if let KeyCode::Char('d') = key.code {
        if let Some(user) = app.selected_user() {
            let message = format!("Delete student \"{}\" ({})?", user.display_name(), user.email);
            let action = PendingAction::DeleteUser(user.id.clone());
            app.ask_confirm(message, action);
        }
    }
}

fn handle_info_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.open_form(Form::info()),
        KeyCode::Char('d') => {
            if let Some(info) = app.selected_info() {
                let message = format!("Delete info banner \"{}\"?", info.title);
                let action = PendingAction::DeleteInfo(info.id.clone());
                app.ask_confirm(message, action);
            }
        }
        _ => {}
    }
}
