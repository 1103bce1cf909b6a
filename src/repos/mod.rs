//!
//! # Repositories
//!
//! Per-resource translation layers between domain operations and HTTP calls.
//! Each repository is a trait (the seam view-models and tests depend on)
//! plus an `Http*` implementation that builds the request, attaches the
//! bearer token where required, and classifies the response through the
//! shared helpers in `crate::client`.

pub mod auth;
pub mod tasks;
pub mod users;

pub use auth::{AuthRepository, HttpAuthRepository};
pub use tasks::{HttpTaskRepository, TaskRepository};
pub use users::{HttpUserRepository, UserRepository};
