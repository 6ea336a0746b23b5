//! Request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::plan::TaskStatus;

/// Registration form
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdateRequest {
    pub status: TaskStatus,
}

/// Pull a readable `detail` out of an error body
///
/// FastAPI sends either `{"detail": "..."}` or, for validation errors,
/// `{"detail": [{"msg": "..."}, ...]}`.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

/// Status echoed in a task update body, top-level or under `task`
pub(crate) fn echoed_status(body: &Value) -> Option<TaskStatus> {
    let status = body
        .get("status")
        .or_else(|| body.get("task").and_then(|t| t.get("status")))?;
    serde_json::from_value(status.clone()).ok()
}
