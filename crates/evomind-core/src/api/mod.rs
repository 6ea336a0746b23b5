//! REST client for the EvoMind backend

mod client;
mod error;
mod mood;
mod profile;
#[cfg(test)]
pub(crate) mod test_support;
mod todos;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use mood::{EmotionLog, EmotionSource};
pub use profile::{ProfileUpdate, UserProfile};
pub use todos::{HabitDraft, TaskDraft};
pub use types::{LoginResponse, NewUser};
