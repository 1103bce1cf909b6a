use tokio::sync::watch;

use crate::models::{Priority, Task};
use crate::repos::TaskRepository;
use crate::session::SessionStore;
use crate::state::UiState;
use crate::viewmodel::resolve_token;

/// Fallback label when a priority id has no loaded counterpart.
const UNKNOWN_PRIORITY: &str = "Select priority";

/// Drives the task list, task mutations, and the priority reference data.
///
/// Three slots: `tasks` for reads (the list screen starts loading on entry,
/// so its initial state is `Loading` rather than `Idle`), `operation` for
/// mutations, and a plain `priorities` list for the lookup table.
pub struct TaskViewModel<R, S> {
    repo: R,
    session: S,
    tasks_tx: watch::Sender<UiState<Vec<Task>>>,
    operation_tx: watch::Sender<UiState<String>>,
    priorities_tx: watch::Sender<Vec<Priority>>,
}

impl<R: TaskRepository, S: SessionStore> TaskViewModel<R, S> {
    pub fn new(repo: R, session: S) -> Self {
        Self {
            repo,
            session,
            tasks_tx: watch::channel(UiState::Loading).0,
            operation_tx: watch::channel(UiState::Idle).0,
            priorities_tx: watch::channel(Vec::new()).0,
        }
    }

    pub fn task_state(&self) -> watch::Receiver<UiState<Vec<Task>>> {
        self.tasks_tx.subscribe()
    }

    pub fn operation_state(&self) -> watch::Receiver<UiState<String>> {
        self.operation_tx.subscribe()
    }

    pub fn priorities(&self) -> watch::Receiver<Vec<Priority>> {
        self.priorities_tx.subscribe()
    }

    pub async fn fetch_tasks(&self) {
        self.tasks_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.tasks_tx).await else {
            return;
        };
        match self.repo.get_all_tasks(&token).await {
            Ok(tasks) => self.tasks_tx.send_replace(UiState::Success(tasks)),
            Err(e) => self.tasks_tx.send_replace(UiState::Error(e.to_string())),
        };
    }

    /// Fetches a single task; published as a one-element list on the same
    /// slot the list screen observes.
    pub async fn get_task_by_id(&self, id: i32) {
        self.tasks_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.tasks_tx).await else {
            return;
        };
        match self.repo.get_task_by_id(id, &token).await {
            Ok(task) => self.tasks_tx.send_replace(UiState::Success(vec![task])),
            Err(e) => self.tasks_tx.send_replace(UiState::Error(e.to_string())),
        };
    }

    /// Loads the priority reference data into the `priorities` slot.
    /// Failures surface on the `tasks` slot, which stays in `Loading` while
    /// the fetch runs.
    pub async fn fetch_priorities(&self) {
        self.tasks_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.tasks_tx).await else {
            return;
        };
        match self.repo.get_all_priorities(&token).await {
            Ok(priorities) => {
                self.priorities_tx.send_replace(priorities);
            }
            Err(e) => {
                self.tasks_tx.send_replace(UiState::Error(e.to_string()));
            }
        };
    }

    /// Pure in-memory lookup against the last-fetched priorities list.
    pub fn priority_name(&self, priority_id: i32) -> String {
        self.priorities_tx
            .borrow()
            .iter()
            .find(|priority| priority.id == priority_id)
            .map(|priority| priority.name.clone())
            .unwrap_or_else(|| UNKNOWN_PRIORITY.to_string())
    }

    pub async fn create_task(&self, task: &Task) {
        self.operation_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.operation_tx).await else {
            return;
        };
        match self.repo.create_task(task, &token).await {
            Ok(message) => self.operation_tx.send_replace(UiState::Success(message)),
            Err(e) => self.operation_tx.send_replace(UiState::Error(e.to_string())),
        };
    }

    pub async fn update_task(&self, task: &Task) {
        self.operation_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.operation_tx).await else {
            return;
        };
        let id = task.id.unwrap_or_default();
        match self.repo.update_task(id, task, &token).await {
            Ok(message) => self.operation_tx.send_replace(UiState::Success(message)),
            Err(e) => self.operation_tx.send_replace(UiState::Error(e.to_string())),
        };
    }

    pub async fn delete_task(&self, id: i32) {
        self.operation_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.operation_tx).await else {
            return;
        };
        match self.repo.delete_task(id, &token).await {
            Ok(message) => self.operation_tx.send_replace(UiState::Success(message)),
            Err(e) => self.operation_tx.send_replace(UiState::Error(e.to_string())),
        };
    }

    pub async fn set_task_completion(&self, id: i32, is_completed: bool) {
        self.operation_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.operation_tx).await else {
            return;
        };
        match self.repo.set_task_completion(id, is_completed, &token).await {
            Ok(message) => self.operation_tx.send_replace(UiState::Success(message)),
            Err(e) => self.operation_tx.send_replace(UiState::Error(e.to_string())),
        };
    }

    /// Deletes every completed task, one request at a time.
    ///
    /// A failure partway leaves earlier deletions in place; there is no
    /// rollback. The fixed success message is published regardless of how
    /// many tasks matched, including zero.
    pub async fn delete_completed_tasks(&self) {
        self.operation_tx.send_replace(UiState::Loading);
        let Some(token) = resolve_token(&self.session, &self.operation_tx).await else {
            return;
        };
        match self.repo.get_all_tasks(&token).await {
            Ok(tasks) => {
                for task in tasks.into_iter().filter(|task| task.is_completed) {
                    if let Err(e) = self
                        .repo
                        .delete_task(task.id.unwrap_or_default(), &token)
                        .await
                    {
                        self.operation_tx.send_replace(UiState::Error(e.to_string()));
                        return;
                    }
                }
                self.operation_tx.send_replace(UiState::Success(
                    "Completed tasks removed successfully".to_string(),
                ));
            }
            Err(e) => {
                self.operation_tx.send_replace(UiState::Error(e.to_string()));
            }
        };
    }
}
