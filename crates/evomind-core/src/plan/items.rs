//! Plan item types

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Task lifecycle status
///
/// Moves forward only: pending → ongoing → completed. `Skipped` is set
/// server-side and is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Ongoing,
    Completed,
    Skipped,
}

impl TaskStatus {
    /// The only legal next status, if any
    pub fn next(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::Ongoing),
            TaskStatus::Ongoing => Some(TaskStatus::Completed),
            TaskStatus::Completed | TaskStatus::Skipped => None,
        }
    }

    /// Whether `to` is the immediate successor of `self`
    pub fn can_advance_to(self, to: TaskStatus) -> bool {
        self.next() == Some(to)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Ongoing => "ongoing",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "ongoing" => Ok(TaskStatus::Ongoing),
            "completed" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// A task, on today's plan or in the full list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTask {
    #[serde(rename = "task_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO date or datetime as sent by the backend
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl PlanTask {
    /// Calendar date part of `due_date`, when it parses
    pub fn due_on(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?;
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// A habit recommended for today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanHabit {
    #[serde(rename = "habit_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: String,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u32,
}

/// Today's recommended tasks and habits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodayPlan {
    #[serde(rename = "recommended_tasks", default)]
    pub tasks: Vec<PlanTask>,
    #[serde(rename = "recommended_habits", default)]
    pub habits: Vec<PlanHabit>,
}

impl TodayPlan {
    pub fn task_mut(&mut self, id: &str) -> Option<&mut PlanTask> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn habit_mut(&mut self, id: &str) -> Option<&mut PlanHabit> {
        self.habits.iter_mut().find(|h| h.id == id)
    }
}

/// Accept any non-negative integral JSON number (the backend stores floats)
pub(crate) fn deserialize_progress<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(de::Error::custom(format!(
            "progress must be a non-negative integer, got {}",
            value
        )));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_next_status() {
        assert_eq!(TaskStatus::Pending.next(), Some(TaskStatus::Ongoing));
        assert_eq!(TaskStatus::Ongoing.next(), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::Completed.next(), None);
        assert_eq!(TaskStatus::Skipped.next(), None);

        assert!(TaskStatus::Pending.can_advance_to(TaskStatus::Ongoing));
        assert!(!TaskStatus::Pending.can_advance_to(TaskStatus::Completed));
        assert!(!TaskStatus::Ongoing.can_advance_to(TaskStatus::Pending));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Ongoing".parse::<TaskStatus>(), Ok(TaskStatus::Ongoing));
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_plan_from_backend_json() {
        let plan: TodayPlan = serde_json::from_value(json!({
            "date": "2025-09-20T00:00:00",
            "recommended_tasks": [{
                "task_id": "t1",
                "title": "Read chapter 3",
                "description": null,
                "due_date": "2025-09-21T09:00:00",
                "status": "pending"
            }],
            "recommended_habits": [{
                "habit_id": "h1",
                "title": "Meditate",
                "frequency": "daily",
                "progress": 2.0
            }]
        }))
        .unwrap();

        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.tasks[0].status, TaskStatus::Pending);
        assert_eq!(
            plan.tasks[0].due_on(),
            NaiveDate::from_ymd_opt(2025, 9, 21)
        );
        assert_eq!(plan.habits[0].progress, 2);
        assert_eq!(plan.habits[0].description, None);
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let plan: TodayPlan = serde_json::from_value(json!({})).unwrap();
        assert!(plan.tasks.is_empty());
        assert!(plan.habits.is_empty());
    }

    #[test]
    fn test_fractional_progress_rejected() {
        let result: Result<PlanHabit, _> = serde_json::from_value(json!({
            "habit_id": "h1",
            "title": "Walk",
            "frequency": "daily",
            "progress": 1.5
        }));
        assert!(result.is_err());
    }
}
