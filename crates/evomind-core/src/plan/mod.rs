//! Today's plan: recommended tasks and habits
//!
//! - Plan item types as served by the backend
//! - [`PlanService`] seam over the remote system of record
//! - [`PlanItemStatusController`] applying status transitions and habit
//!   completions to the in-memory plan

mod controller;
mod items;
mod service;

pub use controller::{PlanItemStatusController, UpdatedProgress, UpdatedTask};
pub use items::{PlanHabit, PlanTask, TaskStatus, TodayPlan};
pub use service::{HabitProgress, PlanService, TaskStatusAck};
