//! EvoMind Core - Shared library for the EvoMind habit, task, and mood tracker
//!
//! This crate provides the headless core behind the app's screens:
//! - Session bootstrap: which screen a returning user lands on
//! - Explicit session context (current user, onboarding state)
//! - Today's-plan status transitions against the backend
//! - SQLite-backed persisted flags
//! - REST client for the EvoMind backend (plan, to-do lists, mood, profile)

pub mod api;
pub mod config;
pub mod constants;
pub mod paths;
pub mod plan;
pub mod session;
pub mod storage;

// Re-exports for convenience
pub use api::{ApiClient, ApiError, EmotionSource, UserProfile};
pub use config::ClientConfig;
pub use plan::{PlanItemStatusController, PlanService, TaskStatus, TodayPlan};
pub use session::{Bootstrap, InitialRoute, SessionBootstrapResolver, SessionContext};
pub use storage::{Database, KeyValueStore, Preferences};
