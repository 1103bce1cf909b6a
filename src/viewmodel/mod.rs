//!
//! # View-Models
//!
//! Each view-model owns one or more observable state slots (`watch`
//! channels carrying `UiState` values) and drives them through the
//! Idle, Loading, Success/Error lifecycle around repository calls.
//!
//! Operations are plain async fns; the caller decides whether to await or
//! spawn them. Nothing is cancelled or de-duplicated: two racing calls on
//! the same slot both run to completion and the later write wins.
//! Authenticated operations resolve the session token first and
//! short-circuit to `Error("Token not found")` without touching the
//! repository when no session exists.

pub mod auth;
pub mod home;
pub mod task;
pub mod user;

pub use auth::AuthViewModel;
pub use home::HomeViewModel;
pub use task::TaskViewModel;
pub use user::UserViewModel;

use tokio::sync::watch;

use crate::error::ApiError;
use crate::session::SessionStore;
use crate::state::UiState;

/// Resolves the session token, publishing the missing-token error into
/// `slot` when no session exists.
pub(crate) async fn resolve_token<S: SessionStore, T>(
    session: &S,
    slot: &watch::Sender<UiState<T>>,
) -> Option<String> {
    match session.token().await {
        Some(token) => Some(token),
        None => {
            slot.send_replace(UiState::Error(ApiError::MissingToken.to_string()));
            None
        }
    }
}
