use async_trait::async_trait;
use reqwest::StatusCode;

use crate::client::{expect_json, ApiClient};
use crate::error::ApiError;
use crate::models::User;

const BASE_PATH: &str = "/api/users";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_id(&self, id: i32, token: &str) -> Result<User, ApiError>;
}

/// `UserRepository` backed by the remote API.
#[derive(Debug, Clone)]
pub struct HttpUserRepository {
    api: ApiClient,
}

impl HttpUserRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn get_user_by_id(&self, id: i32, token: &str) -> Result<User, ApiError> {
        let response = self
            .api
            .get(&format!("{}/{}", BASE_PATH, id), Some(token))
            .await?;
        expect_json(response, StatusCode::OK).await
    }
}
