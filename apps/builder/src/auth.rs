//! Authentication against the resume API and the locally persisted session.
//!
//! The bearer token returned by login is written to the session file and
//! attached to every store request. Protected views are only reachable while
//! a token is present (see [`crate::navigation::guard`]).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest};
use crate::navigation::{Navigator, Notifier, Route};

pub const LOGIN_OK_MESSAGE: &str = "login successfully!";
pub const LOGIN_FAILED_MESSAGE: &str = "Please check your credentials.";
pub const REGISTER_OK_MESSAGE: &str = "Registration successfully!";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Try a different email.";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Auth service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Returns the bearer token for the account.
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;

    async fn register(&self, username: &str, email: &str, password: &str)
        -> Result<(), AuthError>;
}

pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        debug!("/api/auth/login -> {status}");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_login_failure(status, body));
        }
        let body: LoginResponse = response.json().await?;
        Ok(body.token)
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        debug!("/api/auth/register -> {status}");
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.message)
            .unwrap_or(body);
        Err(AuthError::RegistrationFailed(message))
    }
}

/// 400, 401 and 403 mean the credentials were refused. Any other status is a
/// failure of the auth service itself.
fn classify_login_failure(status: StatusCode, body: String) -> AuthError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AuthError::InvalidCredentials
        }
        _ => AuthError::Service {
            status: status.as_u16(),
            message: serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or(body),
        },
    }
}

/// The persisted bearer token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), AuthError> {
        std::fs::write(&self.path, token)?;
        info!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The token, or `NotAuthenticated` when nobody is logged in.
    pub fn require(&self) -> Result<String, AuthError> {
        self.load()?.ok_or(AuthError::NotAuthenticated)
    }
}

/// Logs in, stores the token and lands on the dashboard.
pub async fn login(
    api: &dyn AuthApi,
    session: &SessionStore,
    email: &str,
    password: &str,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
) -> Result<(), AuthError> {
    match api.login(email, password).await {
        Ok(token) => {
            session.save(&token)?;
            navigator.go_to(Route::Dashboard, None);
            notifier.notify_success(LOGIN_OK_MESSAGE);
            Ok(())
        }
        Err(e) => {
            warn!("Login failed for {email}: {e}");
            notifier.notify_error(LOGIN_FAILED_MESSAGE);
            Err(e)
        }
    }
}

/// Creates an account and sends the user to the login view.
pub async fn register(
    api: &dyn AuthApi,
    username: &str,
    email: &str,
    password: &str,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
) -> Result<(), AuthError> {
    match api.register(username, email, password).await {
        Ok(()) => {
            navigator.go_to(Route::Login, None);
            notifier.notify_success(REGISTER_OK_MESSAGE);
            Ok(())
        }
        Err(e) => {
            warn!("Registration failed for {email}: {e}");
            notifier.notify_error(REGISTER_FAILED_MESSAGE);
            Err(e)
        }
    }
}

pub fn logout(session: &SessionStore, navigator: &dyn Navigator) -> Result<(), AuthError> {
    session.clear()?;
    navigator.go_to(Route::Login, None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{MockNavigator, MockNotifier};

    fn session_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session"))
    }

    fn expect_route(route: Route) -> MockNavigator {
        let mut nav = MockNavigator::new();
        nav.expect_go_to()
            .withf(move |r, state| *r == route && state.is_none())
            .times(1)
            .return_const(());
        nav
    }

    #[test]
    fn test_missing_session_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        assert_eq!(session.load().unwrap(), None);
        assert!(matches!(session.require(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_session_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        session.save("tok-123").unwrap();
        assert_eq!(session.require().unwrap(), "tok-123");
        session.clear().unwrap();
        assert_eq!(session.load().unwrap(), None);
        session.clear().unwrap();
    }

    #[test]
    fn test_blank_session_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        std::fs::write(session.path(), "  \n").unwrap();
        assert_eq!(session.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_saves_token_and_opens_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);

        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(|email, password| email == "jane@x.com" && password == "secret")
            .times(1)
            .returning(|_, _| Ok("tok-1".to_string()));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_success()
            .withf(|m| m == LOGIN_OK_MESSAGE)
            .times(1)
            .return_const(());

        login(
            &api,
            &session,
            "jane@x.com",
            "secret",
            &expect_route(Route::Dashboard),
            &notifier,
        )
        .await
        .unwrap();

        assert_eq!(session.require().unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_failed_login_keeps_session_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);

        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_, _| Err(AuthError::InvalidCredentials));
        let mut nav = MockNavigator::new();
        nav.expect_go_to().never();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|m| m == LOGIN_FAILED_MESSAGE)
            .times(1)
            .return_const(());

        let err = login(&api, &session, "jane@x.com", "wrong", &nav, &notifier)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(session.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_goes_to_login() {
        let mut api = MockAuthApi::new();
        api.expect_register()
            .withf(|user, email, _| user == "jane" && email == "jane@x.com")
            .times(1)
            .returning(|_, _, _| Ok(()));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_success()
            .withf(|m| m == REGISTER_OK_MESSAGE)
            .times(1)
            .return_const(());

        register(
            &api,
            "jane",
            "jane@x.com",
            "secret",
            &expect_route(Route::Login),
            &notifier,
        )
        .await
        .unwrap();
    }

    #[test]
    fn test_logout_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        session.save("tok").unwrap();
        logout(&session, &expect_route(Route::Login)).unwrap();
        assert_eq!(session.load().unwrap(), None);
    }

    #[test]
    fn test_login_failure_classification() {
        assert!(matches!(
            classify_login_failure(StatusCode::BAD_REQUEST, String::new()),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            classify_login_failure(StatusCode::UNAUTHORIZED, String::new()),
            AuthError::InvalidCredentials
        ));
        match classify_login_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "db down"}"#.to_string(),
        ) {
            AuthError::Service { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "db down");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            classify_login_failure(StatusCode::BAD_GATEWAY, "upstream".to_string()),
            AuthError::Service { status: 502, ref message } if message == "upstream"
        ));
    }
}
