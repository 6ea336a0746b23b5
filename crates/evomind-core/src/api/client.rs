//! HTTP client
//!
//! One best-effort attempt per call. No retries, and no request timeout beyond
//! the connect timeout; the transport's defaults apply.

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::error::ApiError;
use super::types::{
    echoed_status, extract_detail, LoginRequest, LoginResponse, NewUser, StatusUpdateRequest,
};
use crate::config::ClientConfig;
use crate::constants;
use crate::plan::{HabitProgress, PlanService, TaskStatus, TaskStatusAck, TodayPlan};

/// EvoMind backend client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    fn create_http_client() -> Client {
        Client::builder()
            .user_agent(constants::http::USER_AGENT)
            .connect_timeout(constants::http::CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build HTTP client: {}. Using default client.", e);
                Client::new()
            })
    }

    /// Create a client for the configured backend
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {}", base_url);
        }
        Ok(Self {
            http: Self::create_http_client(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from raw path segments (each one percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(super) fn request(&self, method: Method, segments: &[&str]) -> reqwest::RequestBuilder {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    /// Pass success through, turn anything else into [`ApiError::Rejected`]
    async fn handle_error_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("API error response: {} - {}", status, body);
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail: extract_detail(&body),
        })
    }

    pub(super) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::handle_error_response(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Malformed response body: {} - {}", e, body);
            ApiError::Malformed(e.to_string())
        })
    }

    /// Success with a body nobody reads (create, update, delete)
    pub(super) async fn expect_success(response: Response) -> Result<(), ApiError> {
        Self::handle_error_response(response).await?;
        Ok(())
    }

    /// Create an account
    pub async fn register(&self, user: &NewUser) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, &["users", "register"])
            .json(user)
            .send()
            .await?;
        Self::read_json::<Value>(response).await?;
        Ok(())
    }

    /// Exchange credentials for a user id
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .request(Method::POST, &["users", "login"])
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl PlanService for ApiClient {
    async fn today_plan(&self, user_id: &str) -> Result<TodayPlan, ApiError> {
        let response = self
            .request(Method::GET, &["users", user_id, "recommendations"])
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn update_task_status(
        &self,
        user_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<TaskStatusAck, ApiError> {
        let response = self
            .request(
                Method::PATCH,
                &[
                    "users",
                    user_id,
                    "daily_recommendations",
                    "tasks",
                    task_id,
                    "status",
                ],
            )
            .json(&StatusUpdateRequest { status })
            .send()
            .await?;
        let body: Value = Self::read_json(response).await?;
        Ok(TaskStatusAck {
            status: echoed_status(&body),
        })
    }

    async fn complete_habit(
        &self,
        user_id: &str,
        habit_id: &str,
    ) -> Result<HabitProgress, ApiError> {
        let response = self
            .request(
                Method::PATCH,
                &[
                    "users",
                    user_id,
                    "daily_recommendations",
                    "habits",
                    habit_id,
                    "complete",
                ],
            )
            .send()
            .await?;
        Self::read_json(response).await
    }
}
