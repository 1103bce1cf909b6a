use tokio::sync::watch;

use crate::auth::extract_user_id;
use crate::models::User;
use crate::repos::AuthRepository;
use crate::session::SessionStore;
use crate::state::UiState;

/// Drives the login and registration flows.
///
/// Two independent slots: `login` carries the bearer token on success,
/// `register` carries the server's confirmation message.
pub struct AuthViewModel<A, S> {
    repo: A,
    session: S,
    login_tx: watch::Sender<UiState<String>>,
    register_tx: watch::Sender<UiState<String>>,
}

impl<A: AuthRepository, S: SessionStore> AuthViewModel<A, S> {
    pub fn new(repo: A, session: S) -> Self {
        Self {
            repo,
            session,
            login_tx: watch::channel(UiState::Idle).0,
            register_tx: watch::channel(UiState::Idle).0,
        }
    }

    pub fn login_state(&self) -> watch::Receiver<UiState<String>> {
        self.login_tx.subscribe()
    }

    pub fn register_state(&self) -> watch::Receiver<UiState<String>> {
        self.register_tx.subscribe()
    }

    /// Attempts a login and, on success, persists the session before
    /// publishing it.
    ///
    /// The user id is extracted from the token's `id` claim; a token that
    /// does not decode stores `-1`. When the server reports no token, the
    /// failure reason is published and nothing is persisted.
    pub async fn login(&self, email: &str, password: &str) {
        self.login_tx.send_replace(UiState::Loading);

        let response = self.repo.login(email, password).await;
        match response.token {
            Some(token) => {
                let user_id = extract_user_id(&token);
                if let Err(e) = self.session.save(&token, user_id).await {
                    log::warn!("failed to persist session: {}", e);
                    self.login_tx.send_replace(UiState::Error(e.to_string()));
                    return;
                }
                self.login_tx.send_replace(UiState::Success(token));
            }
            None => {
                let message = response
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string());
                self.login_tx.send_replace(UiState::Error(message));
            }
        }
    }

    pub async fn register(&self, user: &User) {
        self.register_tx.send_replace(UiState::Loading);

        match self.repo.register(user).await {
            Ok(message) => self.register_tx.send_replace(UiState::Success(message)),
            Err(e) => self.register_tx.send_replace(UiState::Error(e.to_string())),
        };
    }
}
