//!
//! # Session Storage
//!
//! Persists the authenticated session (the bearer token and the user id it
//! was issued for) between runs. The `SessionStore` trait is the seam the
//! view-models depend on: "absent" is treated everywhere as "not
//! authenticated" and short-circuits API calls with a `Token not found`
//! error before any request is built.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// On-disk shape of a persisted session.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    jwt_token: String,
    user_id: i32,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists the session, replacing any previous one.
    async fn save(&self, token: &str, user_id: i32) -> io::Result<()>;

    /// Returns the stored token, or `None` when no session exists.
    async fn token(&self) -> Option<String>;

    /// Returns the stored user id, or `-1` when no session exists.
    async fn user_id(&self) -> i32;

    /// Removes the session. Clearing an absent session is not an error.
    async fn clear(&self) -> io::Result<()>;
}

/// File-backed session store keeping a small JSON document at a fixed path.
///
/// Unreadable or malformed files are treated as an absent session rather
/// than an error; the next successful login overwrites them.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Option<SessionRecord> {
        let bytes = tokio::fs::read(&self.path).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, token: &str, user_id: i32) -> io::Result<()> {
        let record = SessionRecord {
            jwt_token: token.to_string(),
            user_id,
        };
        let bytes = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(&self.path, bytes).await
    }

    async fn token(&self) -> Option<String> {
        self.read().await.map(|record| record.jwt_token)
    }

    async fn user_id(&self) -> i32 {
        self.read().await.map(|record| record.user_id).unwrap_or(-1)
    }

    async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
