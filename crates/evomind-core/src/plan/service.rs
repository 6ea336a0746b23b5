//! Remote plan service seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::items::{TaskStatus, TodayPlan};
use crate::api::ApiError;

/// Acknowledgement of a task status update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStatusAck {
    /// Status echoed back by the service, when the body carries one
    pub status: Option<TaskStatus>,
}

/// Habit progress after a completion, as counted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitProgress {
    #[serde(deserialize_with = "super::items::deserialize_progress")]
    pub progress: u32,
}

/// Remote system of record for today's plan
#[async_trait]
pub trait PlanService: Send + Sync {
    /// Fetch today's recommended tasks and habits
    async fn today_plan(&self, user_id: &str) -> Result<TodayPlan, ApiError>;

    /// Request a task status change
    async fn update_task_status(
        &self,
        user_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<TaskStatusAck, ApiError>;

    /// Record one occurrence of a habit
    async fn complete_habit(&self, user_id: &str, habit_id: &str)
        -> Result<HabitProgress, ApiError>;
}
