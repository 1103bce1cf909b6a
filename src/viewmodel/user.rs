use tokio::sync::watch;

use crate::models::User;
use crate::repos::UserRepository;
use crate::session::SessionStore;
use crate::state::UiState;
use crate::viewmodel::resolve_token;

/// Drives the profile screen's user record.
pub struct UserViewModel<R, S> {
    repo: R,
    session: S,
    user_tx: watch::Sender<UiState<User>>,
}

impl<R: UserRepository, S: SessionStore> UserViewModel<R, S> {
    pub fn new(repo: R, session: S) -> Self {
        Self {
            repo,
            session,
            user_tx: watch::channel(UiState::Idle).0,
        }
    }

    pub fn user_state(&self) -> watch::Receiver<UiState<User>> {
        self.user_tx.subscribe()
    }

    pub async fn get_user_by_id(&self, user_id: i32) {
        self.user_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.user_tx).await else {
            return;
        };
        match self.repo.get_user_by_id(user_id, &token).await {
            Ok(user) => self.user_tx.send_replace(UiState::Success(user)),
            Err(e) => self.user_tx.send_replace(UiState::Error(e.to_string())),
        };
    }
}
