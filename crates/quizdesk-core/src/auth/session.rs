use std::sync::{Arc, Weak};

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, ApiResult, AuthFailureHandler};
use crate::models::User;
use crate::routes::{Navigator, LOGIN_PATH};

use super::TokenStore;

/// Shown when a login failure carries no message from the backend.
const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";

/// Snapshot of the session. `user` is only ever set while `token` is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    /// Token present, identity not fetched yet
    Resolving,
    Authenticated,
}

impl Session {
    fn hydrated(token: Option<String>) -> Self {
        Self { token, user: None }
    }

    pub fn status(&self) -> SessionStatus {
        match (&self.token, &self.user) {
            (None, _) => SessionStatus::Unauthenticated,
            (Some(_), None) => SessionStatus::Resolving,
            (Some(_), Some(_)) => SessionStatus::Authenticated,
        }
    }

    /// A token is held, whether or not the identity has arrived yet.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Failed login, carrying the message to show the user.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct LoginError {
    message: String,
    #[source]
    source: ApiError,
}

impl LoginError {
    fn new(source: ApiError) -> Self {
        Self {
            message: source.user_message(LOGIN_FALLBACK_MESSAGE),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn api_error(&self) -> &ApiError {
        &self.source
    }
}

/// The state shared between the provider and the client's auth-failure hook.
struct SessionHandle {
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<Session>,
}

impl SessionHandle {
    /// The one way a session ends: clear storage, reset state, go to login.
    fn end(&self) {
        self.tokens.clear();
        self.state.send_if_modified(|session| {
            if *session == Session::default() {
                false
            } else {
                *session = Session::default();
                true
            }
        });
        if self.navigator.location() != LOGIN_PATH {
            self.navigator.navigate(LOGIN_PATH);
        }
    }
}

impl AuthFailureHandler for SessionHandle {
    fn session_rejected(&self) {
        self.end();
    }
}

/// Owner of the session: current token and identity, login and logout.
pub struct SessionProvider {
    handle: Arc<SessionHandle>,
    api: ApiClient,
}

impl SessionProvider {
    /// Build the provider, hydrating the session from `tokens`. The API
    /// client it creates ends the session whenever the backend rejects it.
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let initial = Session::hydrated(tokens.get());
        debug!(status = ?initial.status(), "Session hydrated");

        let (state, _) = watch::channel(initial);
        let handle = Arc::new(SessionHandle {
            tokens: tokens.clone(),
            navigator,
            state,
        });
        let api = ApiClient::new(base_url, tokens, handle.clone())?;

        Ok(Self { handle, api })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.handle.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.handle.state.borrow().status()
    }

    pub fn token(&self) -> Option<String> {
        self.handle.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.handle.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.handle.state.borrow().is_authenticated()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.handle.state.subscribe()
    }

    /// Exchange credentials for a token, then fetch the identity it belongs to.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, LoginError> {
        let token = self
            .api
            .login(email, password)
            .await
            .map_err(LoginError::new)?;

        self.handle.tokens.set(&token);
        self.handle
            .state
            .send_replace(Session::hydrated(Some(token.clone())));
        info!(email, "Logged in");

        match self.api.current_user().await {
            Ok(user) => {
                self.store_user(&token, &user);
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Identity lookup failed right after login");
                if self.token().as_deref() == Some(token.as_str()) {
                    self.handle.end();
                }
                Err(LoginError::new(e))
            }
        }
    }

    /// End the session and move to the login page.
    pub fn logout(&self) {
        info!("Logging out");
        self.handle.end();
    }

    /// Fetch the identity for the current token. A failure ends the session
    /// instead of surfacing. Safe to run any number of times.
    pub async fn resolve_identity(&self) -> Option<User> {
        let token = self.token()?;

        match self.api.current_user().await {
            Ok(user) => {
                if self.store_user(&token, &user) {
                    Some(user)
                } else {
                    debug!("Token changed during identity lookup, discarding result");
                    None
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not resolve current user");
                // A newer session may have started while the request was out
                if self.token().as_deref() == Some(token.as_str()) {
                    self.logout();
                }
                None
            }
        }
    }

    /// Set the identity if `token` is still the session's token.
    fn store_user(&self, token: &str, user: &User) -> bool {
        let mut current = false;
        self.handle.state.send_if_modified(|session| {
            if session.token.as_deref() != Some(token) {
                return false;
            }
            current = true;
            if session.user.as_ref() == Some(user) {
                false
            } else {
                session.user = Some(user.clone());
                true
            }
        });
        current
    }

    /// Resolve the identity now if a token is held, and again every time the
    /// token changes. Stops when the provider is dropped.
    pub fn spawn_identity_watcher(self: &Arc<Self>) -> JoinHandle<()> {
        let provider: Weak<Self> = Arc::downgrade(self);
        let mut rx = self.subscribe();

        tokio::spawn(async move {
            let mut resolved_for: Option<String> = None;
            loop {
                let token = rx.borrow_and_update().token.clone();
                if token != resolved_for {
                    resolved_for = token.clone();
                    if token.is_some() {
                        let Some(provider) = provider.upgrade() else {
                            break;
                        };
                        provider.resolve_identity().await;
                    }
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
            debug!("Identity watcher stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::routes::History;

    fn make_provider(token: Option<&str>, location: &str) -> (SessionProvider, Arc<MemoryTokenStore>, Arc<History>) {
        let tokens = Arc::new(MemoryTokenStore::new(token.map(str::to_string)));
        let history = Arc::new(History::new(location));
        let provider =
            SessionProvider::new("http://127.0.0.1:9", tokens.clone(), history.clone()).unwrap();
        (provider, tokens, history)
    }

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_status_transitions() {
        let mut session = Session::default();
        assert_eq!(session.status(), SessionStatus::Unauthenticated);
        session.token = Some("t".to_string());
        assert_eq!(session.status(), SessionStatus::Resolving);
        assert!(session.is_authenticated());
        session.user = Some(user());
        assert_eq!(session.status(), SessionStatus::Authenticated);
    }

    #[test]
    fn test_hydrates_from_store() {
        let (provider, _, _) = make_provider(Some("stored"), "/");
        assert_eq!(provider.token().as_deref(), Some("stored"));
        assert_eq!(provider.status(), SessionStatus::Resolving);

        let (provider, _, _) = make_provider(None, "/login");
        assert_eq!(provider.status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn test_logout_clears_everything() {
        let (provider, tokens, history) = make_provider(Some("stored"), "/subjects");
        assert!(provider.store_user("stored", &user()));

        provider.logout();

        assert_eq!(tokens.get(), None);
        assert_eq!(provider.session(), Session::default());
        assert_eq!(history.location(), LOGIN_PATH);
    }

    #[test]
    fn test_logout_on_login_page_does_not_navigate() {
        let (provider, _, history) = make_provider(None, "/login");
        provider.logout();
        assert_eq!(history.location(), LOGIN_PATH);
        assert!(!history.back());
    }

    #[test]
    fn test_store_user_ignores_stale_token() {
        let (provider, _, _) = make_provider(Some("new"), "/");
        assert!(!provider.store_user("old", &user()));
        assert_eq!(provider.user(), None);
        assert!(provider.store_user("new", &user()));
        assert_eq!(provider.user(), Some(user()));
    }

    #[test]
    fn test_auth_failure_hook_ends_session() {
        let (provider, tokens, history) = make_provider(Some("stored"), "/users");
        let mut rx = provider.subscribe();
        provider.handle.session_rejected();

        assert_eq!(tokens.get(), None);
        assert!(!provider.is_authenticated());
        assert_eq!(history.location(), LOGIN_PATH);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().token, None);
    }
}
