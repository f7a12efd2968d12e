//! Route table and route guard.
//!
//! Pages are addressed by path strings. `evaluate` is the guard: a pure
//! function of the requested location and whether a session is active,
//! run before every draw.

use std::sync::RwLock;

use tracing::debug;

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Subjects,
    /// Chapters of one subject
    SubjectDetail(String),
    /// Quiz questions of one chapter
    ManageQuiz(String),
    CreateTryOut,
    TryOuts,
    TryOutResults(String),
    Users,
    Info,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Dashboard => LANDING_PATH.to_string(),
            Route::Subjects => "/subjects".to_string(),
            Route::SubjectDetail(id) => format!("/subject/{}", id),
            Route::ManageQuiz(id) => format!("/quiz/{}", id),
            Route::CreateTryOut => "/create-tryout".to_string(),
            Route::TryOuts => "/tryouts".to_string(),
            Route::TryOutResults(id) => format!("/tryout/{}/results", id),
            Route::Users => "/users".to_string(),
            Route::Info => "/info".to_string(),
        }
    }

    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Dashboard,
            ["login"] => Route::Login,
            ["subjects"] => Route::Subjects,
            ["subject", id] => Route::SubjectDetail(id.to_string()),
            ["quiz", id] => Route::ManageQuiz(id.to_string()),
            ["create-tryout"] => Route::CreateTryOut,
            ["tryouts"] => Route::TryOuts,
            ["tryout", id, "results"] => Route::TryOutResults(id.to_string()),
            ["users"] => Route::Users,
            ["info"] => Route::Info,
            _ => return None,
        };
        Some(route)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Subjects => "Subjects",
            Route::SubjectDetail(_) => "Chapters",
            Route::ManageQuiz(_) => "Chapter Quiz",
            Route::CreateTryOut => "New Try-out",
            Route::TryOuts => "Try-outs",
            Route::TryOutResults(_) => "Try-out Results",
            Route::Users => "Users",
            Route::Info => "Info Banners",
        }
    }
}

/// Outcome of the guard for one location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render(Route),
    Redirect(Route),
}

impl Decision {
    /// The route that ends up on screen.
    pub fn route(&self) -> &Route {
        match self {
            Decision::Render(route) | Decision::Redirect(route) => route,
        }
    }
}

/// Route guard.
pub fn evaluate(location: &str, authenticated: bool) -> Decision {
    match Route::parse(location) {
        Some(Route::Login) if authenticated => Decision::Redirect(Route::Dashboard),
        Some(route) if route.is_public() || authenticated => Decision::Render(route),
        Some(_) => Decision::Redirect(Route::Login),
        None if authenticated => Decision::Redirect(Route::Dashboard),
        None => Decision::Redirect(Route::Login),
    }
}

/// Current location plus the ability to move it.
pub trait Navigator: Send + Sync {
    fn location(&self) -> String;
    fn navigate(&self, path: &str);
}

/// In-process location history backing the console.
pub struct History {
    entries: RwLock<Vec<String>>,
}

impl History {
    pub fn new(start: &str) -> Self {
        Self {
            entries: RwLock::new(vec![start.to_string()]),
        }
    }

    /// Swap the current entry without growing the history (guard redirects).
    pub fn replace(&self, path: &str) {
        if let Ok(mut entries) = self.entries.write() {
            match entries.last_mut() {
                Some(last) => *last = path.to_string(),
                None => entries.push(path.to_string()),
            }
        }
    }

    /// Return to the previous location. False when there is nowhere to go.
    pub fn back(&self) -> bool {
        match self.entries.write() {
            Ok(mut entries) if entries.len() > 1 => {
                entries.pop();
                true
            }
            _ => false,
        }
    }
}

impl Navigator for History {
    fn location(&self) -> String {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.last().cloned())
            .unwrap_or_else(|| LOGIN_PATH.to_string())
    }

    fn navigate(&self, path: &str) {
        debug!(path, "Navigate");
        if let Ok(mut entries) = self.entries.write() {
            if entries.last().map(String::as_str) != Some(path) {
                entries.push(path.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_table() {
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/subjects/"), Some(Route::Subjects));
        assert_eq!(
            Route::parse("/subject/abc123"),
            Some(Route::SubjectDetail("abc123".to_string()))
        );
        assert_eq!(Route::parse("/quiz/c9"), Some(Route::ManageQuiz("c9".to_string())));
        assert_eq!(
            Route::parse("/tryout/t1/results"),
            Some(Route::TryOutResults("t1".to_string()))
        );
        assert_eq!(Route::parse("/create-tryout"), Some(Route::CreateTryOut));
        assert_eq!(Route::parse("/tryout/t1"), None);
        assert_eq!(Route::parse("/nowhere"), None);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        let routes = [
            Route::Login,
            Route::Dashboard,
            Route::Subjects,
            Route::SubjectDetail("s1".to_string()),
            Route::ManageQuiz("c1".to_string()),
            Route::CreateTryOut,
            Route::TryOuts,
            Route::TryOutResults("t1".to_string()),
            Route::Users,
            Route::Info,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_private_page_requires_session() {
        assert_eq!(evaluate("/users", false), Decision::Redirect(Route::Login));
        assert_eq!(evaluate("/", false), Decision::Redirect(Route::Login));
        assert_eq!(evaluate("/users", true), Decision::Render(Route::Users));
    }

    #[test]
    fn test_login_page() {
        assert_eq!(evaluate("/login", false), Decision::Render(Route::Login));
        assert_eq!(evaluate("/login", true), Decision::Redirect(Route::Dashboard));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(evaluate("/nope", true), Decision::Redirect(Route::Dashboard));
        assert_eq!(evaluate("/nope", false), Decision::Redirect(Route::Login));
    }

    #[test]
    fn test_history() {
        let history = History::new("/login");
        assert_eq!(history.location(), "/login");

        history.navigate("/");
        history.navigate("/");
        history.navigate("/subjects");
        assert_eq!(history.location(), "/subjects");

        assert!(history.back());
        assert_eq!(history.location(), "/");

        history.replace("/tryouts");
        assert_eq!(history.location(), "/tryouts");
        assert!(history.back());
        assert_eq!(history.location(), "/login");
        assert!(!history.back());
    }
}
