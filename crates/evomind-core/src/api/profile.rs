//! Account profile

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;
use super::mood::EmotionLog;
use crate::plan::{PlanHabit, PlanTask, TaskStatus};

/// The user record as the backend returns it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub tasks: Vec<PlanTask>,
    #[serde(default)]
    pub habits: Vec<PlanHabit>,
    #[serde(default)]
    pub emotion_logs: Vec<EmotionLog>,
}

impl UserProfile {
    pub fn completed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }

    /// Most recently logged emotion (logs are appended)
    pub fn current_emotion(&self) -> Option<&str> {
        self.emotion_logs.last().map(|log| log.emotion.as_str())
    }
}

/// Editable profile fields. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl ApiClient {
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .request(Method::GET, &["users", user_id])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Update name and/or email, returning the stored record
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        let response = self
            .request(Method::PUT, &["users", user_id])
            .json(update)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// The backend takes both passwords as query parameters
    pub async fn change_password(
        &self,
        user_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::PATCH, &["users", user_id, "password"])
            .query(&[("old_password", old_password), ("new_password", new_password)])
            .send()
            .await?;
        Self::expect_success(response).await
    }
}
