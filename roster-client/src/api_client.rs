use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use roster_core::api::routes::api;
use roster_model::{
    ClearResponse, ErrorResponse, FiltersResponse, HealthResponse,
    RequestListResponse, RequestStatusResponse, SubmitResponse, UserQuery,
    UsersResponse,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Worker queue operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkerApi: Send + Sync {
    async fn submit(&self) -> Result<SubmitResponse>;
    async fn status(&self, request_id: &str) -> Result<RequestStatusResponse>;
    async fn list(&self) -> Result<RequestListResponse>;
    async fn clear(&self) -> Result<ClearResponse>;
}

/// Mock directory operations.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn users(&self, query: &UserQuery) -> Result<UsersResponse>;
    async fn filters(&self) -> Result<FiltersResponse>;
    async fn health(&self) -> Result<HealthResponse>;
}

/// HTTP client for a Roster server
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an existing client, e.g. one without timeouts for streaming.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        log::debug!("[ApiClient] Using base URL: {}", base_url);
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Execute a request and decode a JSON body
    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.execute_raw(request).await?;
        response
            .json::<T>()
            .await
            .context("failed to decode response body")
    }

    /// Execute a request, turning non-success statuses into errors
    pub(crate) async fn execute_raw(
        &self,
        request: RequestBuilder,
    ) -> Result<Response> {
        let response = request.send().await.context("request failed")?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => {
                let message = error_message(response).await;
                Err(anyhow::anyhow!("Not found: {}", message))
            }
            status => {
                let message = error_message(response).await;
                Err(anyhow::anyhow!(
                    "Request failed with status {}: {}",
                    status,
                    message
                ))
            }
        }
    }
}

async fn error_message(response: Response) -> String {
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text)
}

#[async_trait]
impl WorkerApi for ApiClient {
    async fn submit(&self) -> Result<SubmitResponse> {
        let request = self.client.post(self.build_url(api::worker::SUBMIT));
        self.execute_request(request).await
    }

    async fn status(&self, request_id: &str) -> Result<RequestStatusResponse> {
        let request = self
            .client
            .get(self.build_url(&api::worker::status_path(request_id)));
        self.execute_request(request).await
    }

    async fn list(&self) -> Result<RequestListResponse> {
        let request = self.client.get(self.build_url(api::worker::REQUESTS));
        self.execute_request(request).await
    }

    async fn clear(&self) -> Result<ClearResponse> {
        let request = self.client.delete(self.build_url(api::worker::CLEAR));
        self.execute_request(request).await
    }
}

#[async_trait]
impl DirectoryApi for ApiClient {
    async fn users(&self, query: &UserQuery) -> Result<UsersResponse> {
        let request = self
            .client
            .get(self.build_url(api::directory::USERS))
            .query(query);
        self.execute_request(request).await
    }

    async fn filters(&self) -> Result<FiltersResponse> {
        let request = self.client.get(self.build_url(api::directory::FILTERS));
        self.execute_request(request).await
    }

    async fn health(&self) -> Result<HealthResponse> {
        let request = self.client.get(self.build_url(api::HEALTH));
        self.execute_request(request).await
    }
}
