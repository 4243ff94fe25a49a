use std::sync::Mutex;

#[cfg(test)]
use mockall::automock;
use tracing::{error, info};

use crate::models::Resume;

/// Views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    ResumeForm,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::ResumeForm => "/create-resume",
        }
    }

    /// Routes that need a logged-in session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::ResumeForm)
    }
}

/// Resolves where a request for `route` actually lands.
pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.is_protected() && !authenticated {
        Route::Login
    } else {
        route
    }
}

#[cfg_attr(test, automock)]
pub trait Navigator {
    /// Moves to `route`, optionally handing a resume to the next view.
    fn go_to(&self, route: Route, state: Option<Resume>);
}

#[cfg_attr(test, automock)]
pub trait Notifier {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

/// Navigator for the command-line client: remembers where the flow ended up.
pub struct ConsoleNavigator {
    current: Mutex<(Route, Option<Resume>)>,
}

impl ConsoleNavigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: Mutex::new((start, None)),
        }
    }

    pub fn current(&self) -> Route {
        self.current
            .lock()
            .map(|c| c.0)
            .unwrap_or_else(|poisoned| poisoned.into_inner().0)
    }

    /// Hands over the resume passed along with the last navigation, if any.
    pub fn take_state(&self) -> Option<Resume> {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        current.1.take()
    }
}

impl Navigator for ConsoleNavigator {
    fn go_to(&self, route: Route, state: Option<Resume>) {
        info!("Navigating to {}", route.path());
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = (route, state);
    }
}

/// Prints notifications for the user and mirrors them into the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        info!("{message}");
        println!("✔ {message}");
    }

    fn notify_error(&self, message: &str) {
        error!("{message}");
        eprintln!("✘ {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_protected_routes() {
        assert_eq!(guard(Route::Dashboard, false), Route::Login);
        assert_eq!(guard(Route::ResumeForm, false), Route::Login);
        assert_eq!(guard(Route::Dashboard, true), Route::Dashboard);
    }

    #[test]
    fn test_guard_leaves_public_routes() {
        assert_eq!(guard(Route::Login, false), Route::Login);
        assert_eq!(guard(Route::Register, false), Route::Register);
    }

    #[test]
    fn test_console_navigator_tracks_route() {
        let nav = ConsoleNavigator::new(Route::Login);
        assert_eq!(nav.current(), Route::Login);
        nav.go_to(Route::Dashboard, None);
        assert_eq!(nav.current(), Route::Dashboard);
    }

    #[test]
    fn test_console_navigator_hands_over_state_once() {
        let nav = ConsoleNavigator::new(Route::Dashboard);
        let resume = Resume {
            id: Some("abc123".to_string()),
            ..Resume::default()
        };
        nav.go_to(Route::ResumeForm, Some(resume.clone()));
        assert_eq!(nav.take_state(), Some(resume));
        assert_eq!(nav.take_state(), None);
        assert_eq!(nav.current(), Route::ResumeForm);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Route::ResumeForm.path(), "/create-resume");
        assert_eq!(Route::Login.path(), "/");
    }
}
