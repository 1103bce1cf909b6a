use std::fmt;

/// Observable state of a single asynchronous operation slot.
///
/// Exactly one variant is active at a time. A slot re-enters `Loading` on
/// every new invocation; there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState<T> {
    /// Nothing has been requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request finished and produced a payload.
    Success(T),
    /// The last request failed with a human-readable message.
    Error(String),
}

impl<T> UiState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, UiState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UiState::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UiState::Error(_))
    }

    /// Returns the success payload, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            UiState::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> fmt::Display for UiState<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UiState::Idle => write!(f, "idle"),
            UiState::Loading => write!(f, "loading"),
            UiState::Success(_) => write!(f, "success"),
            UiState::Error(message) => write!(f, "error: {}", message),
        }
    }
}
