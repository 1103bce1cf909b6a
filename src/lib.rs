#![doc = "The `taskpilot` library crate."]
#![doc = ""]
#![doc = "This crate contains the client core of the TaskPilot application: domain"]
#![doc = "models, per-resource repositories over the remote JSON API, local session"]
#![doc = "storage, and the observable view-model state machines that screens render."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the CLI."]

pub mod auth;
pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod models;
pub mod repos;
pub mod session;
pub mod state;
pub mod viewmodel;

// Re-export key types for easier use of the library crate.
pub use crate::client::ApiClient;
pub use crate::config::Config;
pub use crate::error::ApiError;
pub use crate::session::{FileSessionStore, SessionStore};
pub use crate::state::UiState;
