use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::client::{expect_json, expect_message, ApiClient};
use crate::error::ApiError;
use crate::models::{Priority, Task};

const BASE_PATH: &str = "/api/tasks";

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn get_all_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError>;

    async fn get_task_by_id(&self, id: i32, token: &str) -> Result<Task, ApiError>;

    /// Creates a task; the server assigns the id. Returns the server's
    /// success message.
    async fn create_task(&self, task: &Task, token: &str) -> Result<String, ApiError>;

    async fn update_task(&self, id: i32, task: &Task, token: &str) -> Result<String, ApiError>;

    async fn delete_task(&self, id: i32, token: &str) -> Result<String, ApiError>;

    /// Flips the completion flag. The request body is a bare JSON boolean.
    async fn set_task_completion(
        &self,
        id: i32,
        is_completed: bool,
        token: &str,
    ) -> Result<String, ApiError>;

    async fn get_all_priorities(&self, token: &str) -> Result<Vec<Priority>, ApiError>;

    /// Total number of tasks for the authenticated user. Never fails: any
    /// non-success response or transport failure yields 0.
    async fn get_task_count(&self, token: &str) -> u32;

    /// Number of completed tasks. Same swallow-to-zero policy as
    /// `get_task_count`.
    async fn get_done_task_count(&self, token: &str) -> u32;
}

/// `TaskRepository` backed by the remote API.
#[derive(Debug, Clone)]
pub struct HttpTaskRepository {
    api: ApiClient,
}

impl HttpTaskRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn count(&self, path: &str, key: &str, token: &str) -> u32 {
        match self.api.get(path, Some(token)).await {
            Ok(response) if response.status() == StatusCode::OK => response
                .json::<HashMap<String, u32>>()
                .await
                .ok()
                .and_then(|body| body.get(key).copied())
                .unwrap_or(0),
            Ok(response) => {
                log::warn!("count request {} returned {}", path, response.status());
                0
            }
            Err(e) => {
                log::warn!("count request {} failed: {}", path, e);
                0
            }
        }
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn get_all_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        let response = self.api.get(BASE_PATH, Some(token)).await?;
        expect_json(response, StatusCode::OK).await
    }

    async fn get_task_by_id(&self, id: i32, token: &str) -> Result<Task, ApiError> {
        let response = self
            .api
            .get(&format!("{}/{}", BASE_PATH, id), Some(token))
            .await?;
        expect_json(response, StatusCode::OK).await
    }

    async fn create_task(&self, task: &Task, token: &str) -> Result<String, ApiError> {
        let response = self.api.post_json(BASE_PATH, task, Some(token)).await?;
        expect_message(response, StatusCode::CREATED, "Task created successfully").await
    }

    async fn update_task(&self, id: i32, task: &Task, token: &str) -> Result<String, ApiError> {
        let response = self
            .api
            .put_json(&format!("{}/{}", BASE_PATH, id), task, Some(token))
            .await?;
        expect_message(response, StatusCode::OK, "Task updated successfully").await
    }

    async fn delete_task(&self, id: i32, token: &str) -> Result<String, ApiError> {
        let response = self
            .api
            .delete(&format!("{}/{}", BASE_PATH, id), Some(token))
            .await?;
        expect_message(response, StatusCode::OK, "Task deleted successfully").await
    }

    async fn set_task_completion(
        &self,
        id: i32,
        is_completed: bool,
        token: &str,
    ) -> Result<String, ApiError> {
        let response = self
            .api
            .put_json(
                &format!("{}/completion/{}", BASE_PATH, id),
                &is_completed,
                Some(token),
            )
            .await?;
        expect_message(
            response,
            StatusCode::OK,
            "Task completion status updated successfully",
        )
        .await
    }

    async fn get_all_priorities(&self, token: &str) -> Result<Vec<Priority>, ApiError> {
        let response = self
            .api
            .get(&format!("{}/priorities", BASE_PATH), Some(token))
            .await?;
        expect_json(response, StatusCode::OK).await
    }

    async fn get_task_count(&self, token: &str) -> u32 {
        self.count(&format!("{}/count/all", BASE_PATH), "taskCount", token)
            .await
    }

    async fn get_done_task_count(&self, token: &str) -> u32 {
        self.count(&format!("{}/count/done", BASE_PATH), "doneTaskCount", token)
            .await
    }
}
