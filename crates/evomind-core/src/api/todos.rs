//! Task and habit lists
//!
//! Creation generates ids on the client from the current time in
//! milliseconds. Edits send the whole record back.

use chrono::Utc;
use reqwest::Method;

use super::client::ApiClient;
use super::error::ApiError;
use crate::plan::{PlanHabit, PlanTask, TaskStatus};

fn new_item_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Fields for a new task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

impl TaskDraft {
    /// New tasks always start out pending
    pub fn into_task(self) -> PlanTask {
        PlanTask {
            id: new_item_id(),
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: TaskStatus::Pending,
        }
    }
}

/// Fields for a new habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    pub title: String,
    pub description: Option<String>,
    pub frequency: String,
}

impl HabitDraft {
    pub fn into_habit(self) -> PlanHabit {
        PlanHabit {
            id: new_item_id(),
            title: self.title,
            description: self.description,
            frequency: self.frequency,
            progress: 0,
        }
    }
}

impl ApiClient {
    pub async fn list_tasks(&self, user_id: &str) -> Result<Vec<PlanTask>, ApiError> {
        let response = self
            .request(Method::GET, &["users", user_id, "tasks"])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Create a task and return it with its generated id
    pub async fn create_task(&self, user_id: &str, draft: TaskDraft) -> Result<PlanTask, ApiError> {
        let task = draft.into_task();
        let response = self
            .request(Method::POST, &["users", user_id, "tasks"])
            .json(&task)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(task)
    }

    pub async fn update_task(&self, user_id: &str, task: &PlanTask) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, &["users", user_id, "tasks", task.id.as_str()])
            .json(task)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    pub async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &["users", user_id, "tasks", task_id])
            .send()
            .await?;
        Self::expect_success(response).await
    }

    pub async fn list_habits(&self, user_id: &str) -> Result<Vec<PlanHabit>, ApiError> {
        let response = self
            .request(Method::GET, &["users", user_id, "habits"])
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Create a habit and return it with its generated id
    pub async fn create_habit(
        &self,
        user_id: &str,
        draft: HabitDraft,
    ) -> Result<PlanHabit, ApiError> {
        let habit = draft.into_habit();
        let response = self
            .request(Method::POST, &["users", user_id, "habits"])
            .json(&habit)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(habit)
    }

    pub async fn update_habit(&self, user_id: &str, habit: &PlanHabit) -> Result<(), ApiError> {
        let response = self
            .request(Method::PUT, &["users", user_id, "habits", habit.id.as_str()])
            .json(habit)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    pub async fn delete_habit(&self, user_id: &str, habit_id: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &["users", user_id, "habits", habit_id])
            .send()
            .await?;
        Self::expect_success(response).await
    }
}
