//!
//! # API Client
//!
//! Thin wrapper around `reqwest::Client` holding the API base URL and the
//! connection-timeout policy. Repositories go through this module for every
//! request; it renders the bearer token into the `Authorization` header and
//! provides the shared response-classification helpers that turn raw HTTP
//! responses into typed results or `ApiError`s.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to a fixed base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response, ApiError> {
        self.send(self.http.get(self.url(path)), token).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response, ApiError> {
        self.send(self.http.delete(self.url(path)), token).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        self.send(self.http.post(self.url(path)).json(body), token)
            .await
    }

    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        self.send(self.http.put(self.url(path)).json(body), token)
            .await
    }

    async fn send(
        &self,
        mut request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(ApiError::from)?;
        log::debug!("{} {}", response.status(), response.url());
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Decodes the body as `T` when the response carries the expected status;
/// otherwise classifies the response as an error.
pub(crate) async fn expect_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T, ApiError> {
    if response.status() == expected {
        return response.json::<T>().await.map_err(ApiError::from);
    }
    Err(error_from_response(response).await)
}

/// Reads the server-supplied `message` field from a mutation response,
/// falling back to `fallback` when the body carries none.
pub(crate) async fn expect_message(
    response: Response,
    expected: StatusCode,
    fallback: &str,
) -> Result<String, ApiError> {
    if response.status() == expected {
        let body = response.json::<MessageBody>().await.map_err(ApiError::from)?;
        return Ok(body.message.unwrap_or_else(|| fallback.to_string()));
    }
    Err(error_from_response(response).await)
}

/// Classifies a non-success response: the `error` field of the body when it
/// decodes, the decode failure's own message when it does not.
pub(crate) async fn error_from_response(response: Response) -> ApiError {
    match response.json::<ErrorBody>().await {
        Ok(body) => ApiError::Server(body.error),
        Err(e) => ApiError::Decode(e.to_string()),
    }
}
