use async_trait::async_trait;
use reqwest::StatusCode;

use crate::auth::{LoginRequest, LoginResponse};
use crate::client::{expect_message, ApiClient};
use crate::error::ApiError;
use crate::models::User;

const BASE_PATH: &str = "/api/auth";

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Attempts a login. Never fails: transport and server failures are
    /// reported through the `error` field of the response.
    async fn login(&self, email: &str, password: &str) -> LoginResponse;

    /// Registers a new account and returns the server's success message.
    async fn register(&self, user: &User) -> Result<String, ApiError>;
}

/// `AuthRepository` backed by the remote API.
#[derive(Debug, Clone)]
pub struct HttpAuthRepository {
    api: ApiClient,
}

impl HttpAuthRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn login(&self, email: &str, password: &str) -> LoginResponse {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self
            .api
            .post_json(&format!("{}/login", BASE_PATH), &request, None)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return LoginResponse {
                    token: None,
                    error: Some(e.to_string()),
                }
            }
        };

        let status = response.status();
        match response.json::<LoginResponse>().await {
            Ok(body) if status == StatusCode::OK => LoginResponse {
                token: body.token,
                error: None,
            },
            Ok(body) => LoginResponse {
                token: None,
                error: body.error,
            },
            Err(e) => LoginResponse {
                token: None,
                error: Some(ApiError::from(e).to_string()),
            },
        }
    }

    async fn register(&self, user: &User) -> Result<String, ApiError> {
        let response = self
            .api
            .post_json(&format!("{}/register", BASE_PATH), user, None)
            .await?;
        expect_message(response, StatusCode::CREATED, "Registration successful").await
    }
}
