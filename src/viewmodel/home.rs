use tokio::sync::watch;

use crate::repos::TaskRepository;
use crate::session::SessionStore;

/// Drives the home screen's task counters.
///
/// The counters are plain values, not `UiState` slots: the count endpoints
/// never fail (they report 0 instead), so there is no error to surface. An
/// absent session likewise shows as zero counts.
pub struct HomeViewModel<R, S> {
    repo: R,
    session: S,
    total_tx: watch::Sender<u32>,
    completed_tx: watch::Sender<u32>,
}

impl<R: TaskRepository, S: SessionStore> HomeViewModel<R, S> {
    pub fn new(repo: R, session: S) -> Self {
        Self {
            repo,
            session,
            total_tx: watch::channel(0).0,
            completed_tx: watch::channel(0).0,
        }
    }

    pub fn total_tasks(&self) -> watch::Receiver<u32> {
        self.total_tx.subscribe()
    }

    pub fn completed_tasks(&self) -> watch::Receiver<u32> {
        self.completed_tx.subscribe()
    }

    pub async fn fetch_task_counts(&self) {
        match self.session.token().await {
            Some(token) => {
                self.total_tx
                    .send_replace(self.repo.get_task_count(&token).await);
                self.completed_tx
                    .send_replace(self.repo.get_done_task_count(&token).await);
            }
            None => {
                self.total_tx.send_replace(0);
                self.completed_tx.send_replace(0);
            }
        }
    }
}
