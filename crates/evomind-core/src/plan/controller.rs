//! Plan item status controller
//!
//! Mediates task status transitions and habit completions against the remote
//! service, then reconciles the in-memory plan. The service is authoritative:
//! local state changes only after a successful response, and habit progress is
//! always overwritten with the service's count, never incremented locally.
//!
//! Overlapping calls are neither coalesced nor sequenced. Whichever response
//! lands last wins.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::items::{PlanHabit, PlanTask, TaskStatus, TodayPlan};
use super::service::{HabitProgress, PlanService};
use crate::api::ApiError;

/// Result of a successful task transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedTask {
    pub task_id: String,
    pub status: TaskStatus,
}

/// Result of a successful habit completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedProgress {
    pub habit_id: String,
    pub progress: u32,
}

/// Applies status changes for one user's plan
pub struct PlanItemStatusController {
    service: Arc<dyn PlanService>,
    user_id: String,
    plan: Mutex<TodayPlan>,
}

impl PlanItemStatusController {
    /// Create a controller with an empty plan. Call [`refresh`](Self::refresh) to load it.
    pub fn new(service: Arc<dyn PlanService>, user_id: impl Into<String>) -> Self {
        Self::with_plan(service, user_id, TodayPlan::default())
    }

    /// Create a controller over an already fetched plan
    pub fn with_plan(
        service: Arc<dyn PlanService>,
        user_id: impl Into<String>,
        plan: TodayPlan,
    ) -> Self {
        Self {
            service,
            user_id: user_id.into(),
            plan: Mutex::new(plan),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Replace the in-memory plan with a fresh copy from the service
    pub async fn refresh(&self) -> Result<TodayPlan, ApiError> {
        let plan = self.service.today_plan(&self.user_id).await?;
        debug!(
            "Fetched plan: {} task(s), {} habit(s)",
            plan.tasks.len(),
            plan.habits.len()
        );
        *self.plan.lock() = plan.clone();
        Ok(plan)
    }

    pub fn plan(&self) -> TodayPlan {
        self.plan.lock().clone()
    }

    pub fn tasks(&self) -> Vec<PlanTask> {
        self.plan.lock().tasks.clone()
    }

    pub fn habits(&self) -> Vec<PlanHabit> {
        self.plan.lock().habits.clone()
    }

    pub fn task(&self, task_id: &str) -> Option<PlanTask> {
        self.plan.lock().tasks.iter().find(|t| t.id == task_id).cloned()
    }

    pub fn habit(&self, habit_id: &str) -> Option<PlanHabit> {
        self.plan
            .lock()
            .habits
            .iter()
            .find(|h| h.id == habit_id)
            .cloned()
    }

    /// Move a task one step forward
    ///
    /// `to` must be the immediate successor of `from`; anything else is
    /// rejected before a request is sent. `from` is not checked against the
    /// local record, so overlapping calls all reach the service.
    pub async fn advance_task(
        &self,
        task_id: &str,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Result<UpdatedTask, ApiError> {
        if !from.can_advance_to(to) {
            warn!("Rejected task transition {} -> {} for {}", from, to, task_id);
            return Err(ApiError::IllegalTransition { from, to });
        }

        let ack = self
            .service
            .update_task_status(&self.user_id, task_id, to)
            .await?;

        if let Some(echoed) = ack.status.filter(|s| *s != to) {
            warn!(
                "Service echoed status {} for task {} after requesting {}",
                echoed, task_id, to
            );
        }

        match self.plan.lock().task_mut(task_id) {
            Some(task) => task.status = to,
            None => debug!("Task {} not in local plan, nothing to update", task_id),
        }
        info!("Task {} moved {} -> {}", task_id, from, to);

        Ok(UpdatedTask {
            task_id: task_id.to_string(),
            status: to,
        })
    }

    /// Record one occurrence of a habit
    ///
    /// Local progress is overwritten with the service's value.
    pub async fn complete_habit_occurrence(
        &self,
        habit_id: &str,
    ) -> Result<UpdatedProgress, ApiError> {
        let HabitProgress { progress } = self
            .service
            .complete_habit(&self.user_id, habit_id)
            .await?;

        match self.plan.lock().habit_mut(habit_id) {
            Some(habit) => habit.progress = progress,
            None => debug!("Habit {} not in local plan, nothing to update", habit_id),
        }
        info!("Habit {} progress is now {}", habit_id, progress);

        Ok(UpdatedProgress {
            habit_id: habit_id.to_string(),
            progress,
        })
    }
}
