//! Login form state and the submit flow
//!
//! [`LoginState`] holds everything the login form shows. The component keeps
//! it in a signal; the submit flow runs against the [`AuthClient`] and
//! [`KeyValueStorage`] seams so it can be driven without a browser.

use crate::core::{Credentials, Role, SessionArtifact};
use crate::ui::http::{AuthClient, ClientError};
use crate::ui::storage::{KeyValueStorage, StorageError, save_session};

/// Shown when a failure carries no message of its own
pub const GENERIC_LOGIN_ERROR: &str = "Login failed. Try again.";

/// Why a login attempt failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LoginError {
    /// Text to show the user
    pub fn display_message(&self) -> String {
        let message = match self {
            LoginError::Client(err) => err.server_message().unwrap_or(GENERIC_LOGIN_ERROR),
            LoginError::Storage(_) => GENERIC_LOGIN_ERROR,
        };
        message.to_string()
    }
}

/// Exchange credentials for a session and persist it
pub async fn authenticate(
    client: &impl AuthClient,
    storage: &mut impl KeyValueStorage,
    credentials: &Credentials,
) -> Result<SessionArtifact, LoginError> {
    let session = client.login(credentials).await?;
    save_session(storage, &session)?;
    Ok(session)
}

/// Everything the login form displays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub role: Role,
    pub email: String,
    pub password: String,
    /// A request is in flight
    pub loading: bool,
    pub error: Option<String>,
    /// Acknowledgement of the last successful login
    pub notice: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            role: self.role,
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.credentials().is_plausible()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading { "Signing in..." } else { "Sign In" }
    }

    /// Enter the loading state and hand out the credentials to send.
    ///
    /// Returns `None` without touching anything when submission is not allowed.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if !self.can_submit() {
            return None;
        }

        self.error = None;
        self.notice = None;
        self.loading = true;
        Some(self.credentials())
    }

    /// Leave the loading state and record the outcome
    pub fn finish_submit(
        &mut self,
        outcome: Result<SessionArtifact, LoginError>,
    ) -> Option<SessionArtifact> {
        self.loading = false;

        match outcome {
            Ok(session) => {
                self.notice = Some(format!("Logged in as {}", session.user.role));
                self.email.clear();
                self.password.clear();
                Some(session)
            }
            Err(err) => {
                self.error = Some(err.display_message());
                None
            }
        }
    }

    /// Run a complete submit against `client` and `storage`
    pub async fn submit(
        &mut self,
        client: &impl AuthClient,
        storage: &mut impl KeyValueStorage,
    ) -> Option<SessionArtifact> {
        let credentials = self.begin_submit()?;
        let outcome = authenticate(client, storage, &credentials).await;
        self.finish_submit(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorBody, SessionUser};
    use crate::ui::storage::{MemoryStorage, STORAGE_KEY_TOKEN, STORAGE_KEY_USER};
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Client answering every call with the same canned result
    struct StubClient {
        result: Result<SessionArtifact, ClientError>,
        calls: RefCell<Vec<Credentials>>,
    }

    impl StubClient {
        fn new(result: Result<SessionArtifact, ClientError>) -> Self {
            Self {
                result,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn admin_session() -> Self {
            Self::new(Ok(SessionArtifact {
                token: "T".to_string(),
                user: SessionUser::with_role(Role::Admin),
            }))
        }
    }

    impl AuthClient for StubClient {
        async fn login(&self, credentials: &Credentials) -> Result<SessionArtifact, ClientError> {
            self.calls.borrow_mut().push(credentials.clone());
            self.result.clone()
        }
    }

    /// Storage that refuses every write
    struct FullStorage;

    impl KeyValueStorage for FullStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed(key.to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn filled(email: &str, password: &str) -> LoginState {
        LoginState {
            email: email.to_string(),
            password: password.to_string(),
            ..LoginState::new()
        }
    }

    #[test]
    fn test_initial_state() {
        let state = LoginState::new();
        assert_eq!(state.role, Role::Clinician);
        assert!(!state.loading);
        assert!(!state.can_submit());
        assert_eq!(state.submit_label(), "Sign In");
    }

    #[test]
    fn test_can_submit_with_valid_input() {
        assert!(filled("a@b.com", "abcdef").can_submit());
    }

    #[test]
    fn test_cannot_submit_with_short_password() {
        assert!(!filled("a@b.com", "abc").can_submit());
        assert!(!filled("a@b.com", "abcde      ").can_submit());
    }

    #[test]
    fn test_cannot_submit_with_blank_email() {
        assert!(!filled("", "abcdef").can_submit());
        assert!(!filled("   ", "abcdef").can_submit());
    }

    #[test]
    fn test_cannot_submit_while_loading() {
        let mut state = filled("a@b.com", "abcdef");
        assert!(state.begin_submit().is_some());

        assert!(state.loading);
        assert!(!state.can_submit());
        assert_eq!(state.submit_label(), "Signing in...");
        assert!(state.begin_submit().is_none());
    }

    #[test]
    fn test_begin_submit_clears_previous_error() {
        let mut state = filled("a@b.com", "abcdef");
        state.error = Some("Invalid credentials".to_string());

        state.begin_submit();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_begin_submit_rejected_leaves_state_untouched() {
        let mut state = filled("a@b.com", "abc");
        state.error = Some("previous".to_string());
        let before = state.clone();

        assert!(state.begin_submit().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_submit_sends_selected_role() {
        let client = StubClient::admin_session();
        let mut storage = MemoryStorage::new();
        let mut state = filled("a@b.com", "abcdef");
        state.role = Role::Specialist;

        block_on(state.submit(&client, &mut storage));

        let calls = client.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            Credentials {
                role: Role::Specialist,
                email: "a@b.com".to_string(),
                password: "abcdef".to_string(),
            }
        );
    }

    #[test]
    fn test_successful_submit_persists_session() {
        let client = StubClient::admin_session();
        let mut storage = MemoryStorage::new();
        let mut state = filled("a@b.com", "abcdef");

        let session = block_on(state.submit(&client, &mut storage));

        assert_eq!(session.map(|s| s.token), Some("T".to_string()));
        assert_eq!(storage.get(STORAGE_KEY_TOKEN).as_deref(), Some("T"));
        assert_eq!(
            storage.get(STORAGE_KEY_USER).as_deref(),
            Some(r#"{"role":"ADMIN"}"#)
        );
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.notice.as_deref(), Some("Logged in as ADMIN"));
        assert!(state.email.is_empty());
        assert!(state.password.is_empty());
    }

    #[test]
    fn test_failed_submit_shows_server_message() {
        let client = StubClient::new(Err(ClientError::Status {
            status: 401,
            body: Some(ErrorBody::new("Invalid credentials")),
        }));
        let mut storage = MemoryStorage::new();
        let mut state = filled("a@b.com", "abcdef");

        let session = block_on(state.submit(&client, &mut storage));

        assert!(session.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.loading);
        assert!(state.can_submit());
        assert!(storage.is_empty());
        assert_eq!(state.email, "a@b.com");
    }

    #[test]
    fn test_failed_submit_without_message_uses_fallback() {
        let client = StubClient::new(Err(ClientError::Network("connection refused".into())));
        let mut storage = MemoryStorage::new();
        let mut state = filled("a@b.com", "abcdef");

        block_on(state.submit(&client, &mut storage));

        assert_eq!(state.error.as_deref(), Some("Login failed. Try again."));
        assert!(!state.loading);
    }

    #[test]
    fn test_storage_failure_uses_fallback() {
        let client = StubClient::admin_session();
        let mut storage = FullStorage;
        let mut state = filled("a@b.com", "abcdef");

        let session = block_on(state.submit(&client, &mut storage));

        assert!(session.is_none());
        assert_eq!(state.error.as_deref(), Some(GENERIC_LOGIN_ERROR));
        assert!(state.notice.is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_submit_refused_when_gate_closed() {
        let client = StubClient::admin_session();
        let mut storage = MemoryStorage::new();
        let mut state = filled("a@b.com", "abc");

        let session = block_on(state.submit(&client, &mut storage));

        assert!(session.is_none());
        assert!(client.calls.borrow().is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_display_message_variants() {
        let err = LoginError::from(ClientError::Decode("bad".into()));
        assert_eq!(err.display_message(), GENERIC_LOGIN_ERROR);

        let err = LoginError::from(StorageError::Unavailable);
        assert_eq!(err.display_message(), GENERIC_LOGIN_ERROR);
    }
}
