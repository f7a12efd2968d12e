//! Application state management for quizdesk.
//!
//! This module contains the core `App` struct: the current route and the
//! data loaded for it, form and dialog state, and the channel through which
//! background API calls report back to the UI loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use quizdesk_core::api::{ApiClient, ApiError, ApiResult, DashboardStats};
use quizdesk_core::models::{
    Chapter, ChapterDraft, Info, InfoDraft, QuizDraft, QuizQuestion, Subject, SubjectDraft,
    TryOut, TryOutAnalytics, TryOutDraft, User,
};
use quizdesk_core::routes::{self, Decision, History, Navigator, Route};
use quizdesk_core::{Config, LoginError, SessionProvider};

use crate::form::{Form, FormKind};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input.
const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Sidebar entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    TryOuts,
    Subjects,
    Users,
    Info,
}

impl NavItem {
    pub const ALL: [NavItem; 5] = [
        NavItem::Dashboard,
        NavItem::TryOuts,
        NavItem::Subjects,
        NavItem::Users,
        NavItem::Info,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            NavItem::Dashboard => "Dashboard",
            NavItem::TryOuts => "Try-outs",
            NavItem::Subjects => "Subjects",
            NavItem::Users => "Users",
            NavItem::Info => "Info",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            NavItem::Dashboard => Route::Dashboard,
            NavItem::TryOuts => Route::TryOuts,
            NavItem::Subjects => Route::Subjects,
            NavItem::Users => Route::Users,
            NavItem::Info => Route::Info,
        }
    }

    /// Sidebar entry for a digit key.
    pub fn from_key(c: char) -> Option<NavItem> {
        c.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| NavItem::ALL.get(i).copied())
    }

    /// Entry to highlight for a route; nested pages belong to their section.
    pub fn for_route(route: &Route) -> Option<NavItem> {
        match route {
            Route::Login => None,
            Route::Dashboard => Some(NavItem::Dashboard),
            Route::TryOuts | Route::CreateTryOut | Route::TryOutResults(_) => Some(NavItem::TryOuts),
            Route::Subjects | Route::SubjectDetail(_) | Route::ManageQuiz(_) => {
                Some(NavItem::Subjects)
            }
            Route::Users => Some(NavItem::Users),
            Route::Info => Some(NavItem::Info),
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    EditingForm,
    Confirming,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

/// Data loaded for the current page.
#[derive(Debug, Clone)]
pub enum PageData {
    Dashboard(DashboardStats),
    Subjects(Vec<Subject>),
    SubjectDetail {
        subject: Subject,
        chapters: Vec<Chapter>,
    },
    Quiz {
        chapter: Chapter,
        questions: Vec<QuizQuestion>,
    },
    TryOuts(Vec<TryOut>),
    TryOutResults {
        tryout: TryOut,
        stats: TryOutAnalytics,
    },
    Users(Vec<User>),
    Infos(Vec<Info>),
}

#[derive(Debug, Clone)]
pub enum PageState {
    /// Pages with nothing to fetch (login, the try-out builder)
    Static,
    Loading,
    Ready(PageData),
    Failed(String),
}

/// Destructive action waiting for a yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteSubject(String),
    DeleteChapter(String),
    DeleteQuiz(String),
    DeleteTryOut(String),
    DeleteUser(String),
    DeleteInfo(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub message: String,
    pub action: PendingAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from background API tasks back to the UI loop.
pub enum ApiEvent {
    LoggedIn(Result<User, LoginError>),
    /// Page data for the route at `path`
    Loaded { path: String, data: PageData },
    LoadFailed { path: String, message: String },
    /// A create/update/delete succeeded; go to `then`, or reload the page
    Saved { message: String, then: Option<Route> },
    Failed { message: String },
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    pub session: Arc<SessionProvider>,
    pub history: Arc<History>,

    pub state: AppState,
    pub route: Option<Route>,
    pub page: PageState,
    pub selection: usize,

    // Login form state
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    pub login_pending: bool,

    pub form: Option<Form>,
    pub confirm: Option<Confirm>,
    pub tryout_draft: TryOutDraft,

    pub notice: Option<Notice>,

    events_rx: mpsc::Receiver<ApiEvent>,
    events_tx: mpsc::Sender<ApiEvent>,
}

impl App {
    pub fn new(config: Config, session: Arc<SessionProvider>, history: Arc<History>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill from env vars or the last successful login
        let login_email = std::env::var("QUIZDESK_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let login_password = std::env::var("QUIZDESK_PASSWORD").unwrap_or_default();
        let login_focus = if login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };

        Self {
            config,
            session,
            history,

            state: AppState::Normal,
            route: None,
            page: PageState::Static,
            selection: 0,

            login_email,
            login_password,
            login_focus,
            login_error: None,
            login_pending: false,

            form: None,
            confirm: None,
            tryout_draft: TryOutDraft::default(),

            notice: None,

            events_rx: rx,
            events_tx: tx,
        }
    }

    fn api(&self) -> ApiClient {
        self.session.api().clone()
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Run the route guard on the current location and mount the page it
    /// settles on. Called before every draw.
    pub fn sync_route(&mut self) {
        let location = self.history.location();
        let decision = routes::evaluate(&location, self.session.is_authenticated());

        if let Decision::Redirect(target) = &decision {
            debug!(from = %location, to = %target.path(), "Route guard redirect");
            self.history.replace(&target.path());
        }

        let route = decision.route().clone();
        if self.route.as_ref() != Some(&route) {
            self.mount(route);
        }
    }

    fn mount(&mut self, route: Route) {
        debug!(path = %route.path(), "Mounting page");
        self.selection = 0;
        self.form = None;
        self.confirm = None;
        if self.state != AppState::ConfirmingQuit {
            self.state = AppState::Normal;
        }

        match route {
            Route::Login => {
                self.page = PageState::Static;
                self.login_pending = false;
            }
            Route::CreateTryOut => {
                self.page = PageState::Static;
                self.tryout_draft = TryOutDraft::default();
            }
            _ => {
                self.page = PageState::Loading;
                self.spawn_load(route.clone());
            }
        }
        self.route = Some(route);
    }

    pub fn navigate(&mut self, route: Route) {
        self.notice = None;
        self.history.navigate(&route.path());
    }

    pub fn go_back(&mut self) {
        if self.history.back() {
            self.notice = None;
        }
    }

    /// Fetch the current page again, keeping what is on screen meanwhile.
    pub fn reload(&mut self) {
        if let Some(route) = self.route.clone() {
            if !matches!(route, Route::Login | Route::CreateTryOut) {
                self.spawn_load(route);
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.login_password.clear();
        self.notice = Some(Notice {
            text: "Logged out".to_string(),
            is_error: false,
        });
    }

    // =========================================================================
    // Background tasks
    // =========================================================================

    fn spawn_load(&self, route: Route) {
        let api = self.api();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let path = route.path();
            let event = match load_page(&api, &route).await {
                Ok(data) => ApiEvent::Loaded { path, data },
                Err(e) => {
                    error!(path = %path, error = %e, "Failed to load page");
                    let message = match (&route, &e) {
                        (Route::SubjectDetail(_), ApiError::NotFound(_)) => {
                            "Subject not found".to_string()
                        }
                        _ => e.user_message("Failed to load data"),
                    };
                    ApiEvent::LoadFailed { path, message }
                }
            };
            let _ = tx.send(event).await;
        });
    }

    /// Run a mutating call in the background and report the outcome.
    fn spawn_save<F>(&self, success: &str, then: Option<Route>, call: F)
    where
        F: std::future::Future<Output = ApiResult<()>> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let message = success.to_string();

        tokio::spawn(async move {
            let event = match call.await {
                Ok(()) => ApiEvent::Saved { message, then },
                Err(e) => {
                    warn!(error = %e, "Save failed");
                    ApiEvent::Failed {
                        message: e.user_message("Request failed"),
                    }
                }
            };
            let _ = tx.send(event).await;
        });
    }

    pub fn attempt_login(&mut self) {
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return;
        }

        self.login_error = None;
        self.login_pending = true;

        let session = self.session.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = session.login(&email, &password).await;
            let _ = tx.send(ApiEvent::LoggedIn(result)).await;
        });
    }

    /// Drain finished background work into app state.
    pub fn check_background_tasks(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            events.push(event);
        }
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::LoggedIn(Ok(user)) => {
                info!("Login successful");
                self.login_pending = false;
                self.login_password.clear();
                self.config.last_email = Some(user.email.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.notice = Some(Notice {
                    text: format!("Welcome, {}", user.display_name()),
                    is_error: false,
                });
            }
            ApiEvent::LoggedIn(Err(e)) => {
                self.login_pending = false;
                self.login_error = Some(e.message().to_string());
            }
            ApiEvent::Loaded { path, data } => {
                if !self.is_current(&path) {
                    debug!(path = %path, "Discarding result for a page no longer shown");
                    return;
                }
                self.page = PageState::Ready(data);
                self.clamp_selection();
            }
            ApiEvent::LoadFailed { path, message } => {
                if !self.is_current(&path) {
                    return;
                }
                if matches!(self.page, PageState::Loading) {
                    self.page = PageState::Failed(message.clone());
                }
                self.notice = Some(Notice {
                    text: message,
                    is_error: true,
                });
            }
            ApiEvent::Saved { message, then } => {
                self.notice = Some(Notice {
                    text: message,
                    is_error: false,
                });
                match then {
                    Some(route) => self.history.navigate(&route.path()),
                    None => self.reload(),
                }
            }
            ApiEvent::Failed { message } => {
                self.notice = Some(Notice {
                    text: message,
                    is_error: true,
                });
            }
        }
    }

    fn is_current(&self, path: &str) -> bool {
        self.route.as_ref().map(|r| r.path()).as_deref() == Some(path)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Number of selectable rows on the current page.
    pub fn list_len(&self) -> usize {
        if self.route == Some(Route::CreateTryOut) {
            return self.tryout_draft.questions.len();
        }
        match &self.page {
            PageState::Ready(PageData::Subjects(items)) => items.len(),
            PageState::Ready(PageData::SubjectDetail { chapters, .. }) => chapters.len(),
            PageState::Ready(PageData::Quiz { questions, .. }) => questions.len(),
            PageState::Ready(PageData::TryOuts(items)) => items.len(),
            PageState::Ready(PageData::TryOutResults { stats, .. }) => stats.participants.len(),
            PageState::Ready(PageData::Users(items)) => items.len(),
            PageState::Ready(PageData::Infos(items)) => items.len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self, step: usize) {
        let len = self.list_len();
        if len > 0 {
            self.selection = (self.selection + step).min(len - 1);
        }
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selection = self.selection.saturating_sub(step);
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len();
        if self.selection >= len {
            self.selection = len.saturating_sub(1);
        }
    }

    pub fn selected_subject(&self) -> Option<&Subject> {
        match &self.page {
            PageState::Ready(PageData::Subjects(items)) => items.get(self.selection),
            _ => None,
        }
    }

    pub fn current_subject(&self) -> Option<(&Subject, &[Chapter])> {
        match &self.page {
            PageState::Ready(PageData::SubjectDetail { subject, chapters }) => {
                Some((subject, chapters.as_slice()))
            }
            _ => None,
        }
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        self.current_subject()
            .and_then(|(_, chapters)| chapters.get(self.selection))
    }

    pub fn current_quiz(&self) -> Option<(&Chapter, &[QuizQuestion])> {
        match &self.page {
            PageState::Ready(PageData::Quiz { chapter, questions }) => {
                Some((chapter, questions.as_slice()))
            }
            _ => None,
        }
    }

    pub fn selected_question(&self) -> Option<&QuizQuestion> {
        self.current_quiz()
            .and_then(|(_, questions)| questions.get(self.selection))
    }

    pub fn selected_tryout(&self) -> Option<&TryOut> {
        match &self.page {
            PageState::Ready(PageData::TryOuts(items)) => items.get(self.selection),
            _ => None,
        }
    }

    pub fn selected_user(&self) -> Option<&User> {
        match &self.page {
            PageState::Ready(PageData::Users(items)) => items.get(self.selection),
            _ => None,
        }
    }

    pub fn selected_info(&self) -> Option<&Info> {
        match &self.page {
            PageState::Ready(PageData::Infos(items)) => items.get(self.selection),
            _ => None,
        }
    }

    // =========================================================================
    // Forms
    // =========================================================================

    pub fn open_form(&mut self, form: Form) {
        self.form = Some(form);
        self.state = AppState::EditingForm;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.state = AppState::Normal;
    }

    /// Validate the open form and act on it. Validation errors stay in the
    /// form; everything else closes it.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };

        match self.apply_form(&form) {
            Ok(()) => self.close_form(),
            Err(message) => {
                if let Some(open) = self.form.as_mut() {
                    open.error = Some(message);
                }
            }
        }
    }

    fn apply_form(&mut self, form: &Form) -> Result<(), String> {
        let api = self.api();

        match &form.kind {
            FormKind::CreateSubject | FormKind::EditSubject { .. } => {
                let payload = SubjectDraft {
                    title: form.value("Title").to_string(),
                    description: form.value("Description").to_string(),
                }
                .validate()
                .map_err(|e| e.to_string())?;

                if let FormKind::EditSubject { id } = &form.kind {
                    let id = id.clone();
                    self.spawn_save("Subject updated", None, async move {
                        api.update_subject(&id, &payload).await
                    });
                } else {
                    self.spawn_save("Subject created", None, async move {
                        api.create_subject(&payload).await
                    });
                }
            }
            FormKind::CreateChapter { subject_id } => {
                let upload = ChapterDraft {
                    title: form.value("Title").to_string(),
                    description: form.value("Description").to_string(),
                    video: ChapterDraft::path_from_input(form.value("Video file")),
                    document: ChapterDraft::path_from_input(form.value("PDF file")),
                }
                .validate()
                .map_err(|e| e.to_string())?;

                let subject_id = subject_id.clone();
                self.spawn_save("Chapter created", None, async move {
                    api.create_chapter(&subject_id, &upload).await
                });
            }
            FormKind::CreateQuiz {
                chapter_id,
                subject_id,
                number,
            } => {
                let payload = quiz_draft_from(form)?
                    .validate(chapter_id, subject_id.as_deref(), Some(*number))
                    .map_err(|e| e.to_string())?;
                let chapter_id = chapter_id.clone();
                self.spawn_save("Question saved", None, async move {
                    api.create_quiz(&chapter_id, &payload).await
                });
            }
            FormKind::EditQuiz {
                id,
                chapter_id,
                subject_id,
            } => {
                let payload = quiz_draft_from(form)?
                    .validate(chapter_id, subject_id.as_deref(), None)
                    .map_err(|e| e.to_string())?;
                let id = id.clone();
                self.spawn_save("Question updated", None, async move {
                    api.update_quiz(&id, &payload).await
                });
            }
            FormKind::TryOutDetails => {
                let title = form.value("Title").to_string();
                if title.trim().is_empty() {
                    return Err("Title is required".to_string());
                }
                self.tryout_draft
                    .set_duration(form.value("Duration"))
                    .map_err(|e| e.to_string())?;
                self.tryout_draft.title = title;
                self.tryout_draft.description = form.value("Description").to_string();
            }
            FormKind::TryOutQuestion(index) => {
                let Some(question) = self.tryout_draft.questions.get_mut(*index) else {
                    return Err("Question no longer exists".to_string());
                };
                question.question = form.value("Question").to_string();
                question.explanation = form.value("Explanation").to_string();
                for (i, option) in form.options().iter().enumerate() {
                    question.set_option(i, option);
                }
                match answer_letter(form)? {
                    Some(label) if !question.choose_answer(label) => {
                        return Err(CORRECT_ANSWER_HINT.to_string())
                    }
                    Some(_) => {}
                    None => question.correct_answer.clear(),
                }
            }
            FormKind::CreateInfo => {
                let upload = InfoDraft {
                    title: form.value("Title").to_string(),
                    image: ChapterDraft::path_from_input(form.value("Image file")),
                }
                .validate()
                .map_err(|e| e.to_string())?;
                self.spawn_save("Info banner created", None, async move {
                    api.create_info(&upload).await
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Try-out builder
    // =========================================================================

    pub fn add_tryout_question(&mut self) {
        self.selection = self.tryout_draft.add_question();
    }

    pub fn remove_tryout_question(&mut self) {
        if self.tryout_draft.remove_question(self.selection) {
            self.clamp_selection();
        } else {
            self.notice = Some(Notice {
                text: "A try-out needs at least one question".to_string(),
                is_error: true,
            });
        }
    }

    pub fn save_tryout(&mut self) {
        match self.tryout_draft.validate() {
            Ok(payload) => {
                let api = self.api();
                self.spawn_save("Try-out package created", Some(Route::TryOuts), async move {
                    api.create_tryout(&payload).await
                });
            }
            Err(e) => {
                self.notice = Some(Notice {
                    text: e.to_string(),
                    is_error: true,
                });
            }
        }
    }

    // =========================================================================
    // Confirmations
    // =========================================================================

    pub fn ask_confirm(&mut self, message: impl Into<String>, action: PendingAction) {
        self.confirm = Some(Confirm {
            message: message.into(),
            action,
        });
        self.state = AppState::Confirming;
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
        self.state = AppState::Normal;
    }

    pub fn run_confirmed(&mut self) {
        let Some(confirm) = self.confirm.take() else {
            return;
        };
        self.state = AppState::Normal;
        let api = self.api();

        match confirm.action {
            PendingAction::DeleteSubject(id) => {
                self.spawn_save("Subject deleted", None, async move { api.delete_subject(&id).await })
            }
            PendingAction::DeleteChapter(id) => {
                self.spawn_save("Chapter deleted", None, async move { api.delete_chapter(&id).await })
            }
            PendingAction::DeleteQuiz(id) => {
                self.spawn_save("Question deleted", None, async move { api.delete_quiz(&id).await })
            }
            PendingAction::DeleteTryOut(id) => {
                self.spawn_save("Try-out deleted", None, async move { api.delete_tryout(&id).await })
            }
            PendingAction::DeleteUser(id) => {
                self.spawn_save("User deleted", None, async move { api.delete_user(&id).await })
            }
            PendingAction::DeleteInfo(id) => {
                self.spawn_save("Info banner deleted", None, async move { api.delete_info(&id).await })
            }
        }
    }

    /// Name to greet the signed-in user with.
    pub fn greeting_name(&self) -> String {
        self.session
            .user()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "User".to_string())
    }
}

const CORRECT_ANSWER_HINT: &str = "Correct answer must be the letter (A-E) of a filled option";

fn quiz_draft_from(form: &Form) -> Result<QuizDraft, String> {
    let mut draft = QuizDraft {
        question: form.value("Question").to_string(),
        explanation: form.value("Explanation").to_string(),
        ..Default::default()
    };
    for (i, option) in form.options().iter().enumerate() {
        draft.set_option(i, option);
    }

    if let Some(label) = answer_letter(form)? {
        if !draft.choose_answer(label) {
            return Err(CORRECT_ANSWER_HINT.to_string());
        }
    }
    Ok(draft)
}

/// The single letter typed into "Correct answer", if any.
fn answer_letter(form: &Form) -> Result<Option<char>, String> {
    let mut letters = form.value("Correct answer").trim().chars();
    match (letters.next(), letters.next()) {
        (None, _) => Ok(None),
        (Some(label), None) => Ok(Some(label)),
        _ => Err(CORRECT_ANSWER_HINT.to_string()),
    }
}

/// Fetch everything a page shows. Pages with two sources load them concurrently.
async fn load_page(api: &ApiClient, route: &Route) -> ApiResult<PageData> {
    Ok(match route {
        Route::Dashboard => PageData::Dashboard(api.dashboard_stats().await?),
        Route::Subjects => PageData::Subjects(api.subjects().await?),
        Route::SubjectDetail(id) => {
            let (subject, chapters) = futures::try_join!(api.subject(id), api.chapters(id))?;
            PageData::SubjectDetail { subject, chapters }
        }
        Route::ManageQuiz(id) => {
            let (chapter, questions) = futures::try_join!(api.chapter(id), api.quizzes(id))?;
            PageData::Quiz { chapter, questions }
        }
        Route::TryOuts => PageData::TryOuts(api.tryouts().await?),
        Route::TryOutResults(id) => {
            let (tryout, stats) =
                futures::try_join!(api.tryout(id), api.tryout_analytics(id))?;
            PageData::TryOutResults { tryout, stats }
        }
        Route::Users => PageData::Users(User::students(api.users().await?)),
        Route::Info => PageData::Infos(api.infos().await?),
        Route::Login | Route::CreateTryOut => {
            return Err(ApiError::InvalidResponse(format!(
                "{} has nothing to load",
                route.path()
            )))
        }
    })
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
